//! CSV loader for batch estimate scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name (column order does not matter) and values are
//! trimmed.
//!
//! | Column   | Required | Type    | Notes                                        |
//! |----------|----------|---------|----------------------------------------------|
//! | `income` | yes      | decimal | Annual income, must be non-negative          |
//! | `entity` | yes      | string  | `proprietorship`, `partnership`, `private-limited`, `llp` |
//!
//! Unrecognized entity codes fall back to `proprietorship` with a warning;
//! that substitution is the documented default for unknown input, not an
//! error. Negative income is an error and names the offending row.
//!
//! ### Example
//!
//! ```csv
//! income,entity
//! 400000,private-limited
//! 1500000,proprietorship
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use savings_core::EntityType;

#[derive(Debug, Deserialize)]
struct CsvRow {
    income: Decimal,
    entity: String,
}

/// One batch scenario: an income and the entity type to estimate it under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub income: Decimal,
    pub entity: EntityType,
}

/// Errors that can occur while loading scenario data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read scenario file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// An `income` cell was negative. `row` is 1-based (header = row 0).
    #[error("income must be non-negative, got {income} on row {row}")]
    NegativeIncome { income: Decimal, row: usize },
}

/// Convert a single CSV row into a Scenario.
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, CsvLoadError> {
    if row.income < Decimal::ZERO {
        return Err(CsvLoadError::NegativeIncome {
            income: row.income,
            row: row_number,
        });
    }

    let entity = EntityType::parse(&row.entity).unwrap_or_else(|| {
        warn!(
            input = %row.entity,
            row = row_number,
            "unrecognized entity type, using proprietorship"
        );
        EntityType::SoleProprietorship
    });

    Ok(Scenario {
        income: row.income,
        entity,
    })
}

/// Parse CSV text and return scenarios in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] – if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [`CsvLoadError::NegativeIncome`] – if any row carries negative income.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            let row_number = idx + 1; // 1-based for user-facing messages
            convert_row(row, row_number)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}
