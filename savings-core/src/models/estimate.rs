use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of one estimate, in whole currency units.
///
/// `current_tax` and `optimized_tax` are always non-negative.
/// `savings` is exactly `current_tax - optimized_tax` and goes negative when
/// the minimum-tax floor exceeds the discounted base tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub current_tax: Decimal,
    pub optimized_tax: Decimal,
    pub savings: Decimal,
}
