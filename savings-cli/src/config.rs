//! Regime configuration loading.
//!
//! Bracket boundaries and rates are data, not code: a jurisdictional update
//! ships as a TOML file passed via `--regime`. Decimal values are written as
//! strings so they parse exactly.
//!
//! ## Example
//!
//! ```toml
//! cess_rate = "0.04"
//! minimum_tax_rate = "0.10"
//!
//! [[brackets]]
//! min_income = "0"
//! max_income = "250000"
//! base_tax = "0"
//! rate = "0"
//!
//! # ... remaining brackets; the last one omits max_income ...
//!
//! [[entity_rates]]
//! entity = "proprietorship"
//! marginal_rate = "0.30"
//! optimization_rate = "0.25"
//! ```

use std::path::Path;

use savings_core::{RegimeError, TaxRegime};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a regime file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read regime file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid regime TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid regime: {0}")]
    Invalid(#[from] RegimeError),
}

/// Parses and validates a regime from TOML text.
pub fn regime_from_str(input: &str) -> Result<TaxRegime, ConfigError> {
    let regime: TaxRegime = toml::from_str(input)?;
    regime.validate()?;
    Ok(regime)
}

/// Reads, parses, and validates a regime file.
pub fn load_regime(path: &Path) -> Result<TaxRegime, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let regime = regime_from_str(&contents)?;
    debug!(
        path = %path.display(),
        brackets = regime.brackets.len(),
        "loaded tax regime"
    );
    Ok(regime)
}
