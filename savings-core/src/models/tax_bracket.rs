use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a progressive bracket table.
///
/// Lookup semantics are `min_income < income <= max_income`; the top bracket
/// leaves `max_income` as `None` and its rate is replaced by the entity's
/// marginal rate at calculation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub base_tax: Decimal,
    pub rate: Decimal,
}
