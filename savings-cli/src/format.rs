//! Currency formatting and numeric input parsing.
//!
//! Amounts render with Indian digit grouping (`₹ 12,34,567`): the last three
//! digits form one group, everything above groups in pairs. Negative amounts
//! carry a leading minus (`- ₹ 32,200`).

use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Parses an amount string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"12,50,000"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = s.trim().replace(',', "");
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats a whole-unit amount as a rupee string with Indian grouping.
pub fn format_currency(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    let digits = rounded.abs().normalize().to_string();
    let grouped = group_indian(&digits);

    if negative {
        format!("- ₹ {grouped}")
    } else {
        format!("₹ {grouped}")
    }
}

/// Inserts Indian-style separators into an unsigned digit string.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut pairs = Vec::new();
    let mut idx = head.len();
    while idx > 2 {
        pairs.push(&head[idx - 2..idx]);
        idx -= 2;
    }
    pairs.push(&head[..idx]);
    pairs.reverse();

    format!("{},{}", pairs.join(","), tail)
}
