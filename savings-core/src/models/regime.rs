use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{EntityType, TaxBracket};

/// Errors reported by [`TaxRegime::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegimeError {
    /// The bracket table is empty.
    #[error("no tax brackets configured")]
    NoBrackets,

    /// The first bracket must start at zero income.
    #[error("first bracket must start at 0, got {0}")]
    FirstBracketNotZero(Decimal),

    /// Brackets must be contiguous: each `max_income` equals the next
    /// bracket's `min_income`.
    #[error("bracket starting at {0} does not continue from the previous bracket")]
    BracketGap(Decimal),

    /// Every bracket except the last needs an upper bound, and the last must
    /// be open-ended.
    #[error("exactly the last bracket must have an open upper bound")]
    BadOpenBracket,

    /// A rate fell outside the [0, 1] range.
    #[error("rate '{name}' must be between 0 and 1, got {value}")]
    RateOutOfRange { name: &'static str, value: Decimal },

    /// A bracket amount that must be non-negative was negative. A negative
    /// `base_tax` would let the slab tax itself go negative.
    #[error("'{name}' must be non-negative, got {value}")]
    NegativeAmount { name: &'static str, value: Decimal },
}

/// Per-entity rate parameters.
///
/// `marginal_rate` applies only in the open top bracket; `optimization_rate`
/// is the discount applied to base tax when modeling deductions and
/// restructuring benefits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRates {
    pub entity: EntityType,
    pub marginal_rate: Decimal,
    pub optimization_rate: Decimal,
}

/// Complete rate configuration for one jurisdiction.
///
/// All constants the estimator needs live here so a jurisdictional update is
/// a data change, not a code change. [`TaxRegime::default`] carries the
/// built-in slab table and entity rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRegime {
    /// Progressive slabs, ordered by `min_income`, last one open-ended.
    pub brackets: Vec<TaxBracket>,

    /// Marginal and optimization rates per entity type.
    pub entity_rates: Vec<EntityRates>,

    /// Flat surcharge applied on top of slab tax (4% cess).
    pub cess_rate: Decimal,

    /// Optimized tax may not fall below `income * minimum_tax_rate`.
    pub minimum_tax_rate: Decimal,
}

impl TaxRegime {
    /// Rates for `entity`, falling back to the proprietorship defaults when
    /// the table has no entry. The fallback is the documented behavior for
    /// unrecognized input, not an error.
    pub fn rates_for(
        &self,
        entity: EntityType,
    ) -> EntityRates {
        self.entity_rates
            .iter()
            .copied()
            .find(|r| r.entity == entity)
            .unwrap_or_else(|| {
                warn!(entity = %entity, "no configured rates for entity, using defaults");
                EntityRates {
                    entity,
                    marginal_rate: Decimal::new(30, 2),
                    optimization_rate: Decimal::new(25, 2),
                }
            })
    }

    /// Checks structural invariants of the table.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegimeError`] found: empty table, brackets that
    /// do not start at zero or leave gaps, a closed top bracket, or any rate
    /// outside [0, 1].
    pub fn validate(&self) -> Result<(), RegimeError> {
        let Some(first) = self.brackets.first() else {
            return Err(RegimeError::NoBrackets);
        };
        if first.min_income != Decimal::ZERO {
            return Err(RegimeError::FirstBracketNotZero(first.min_income));
        }

        for pair in self.brackets.windows(2) {
            match pair[0].max_income {
                Some(max) if max == pair[1].min_income => {}
                Some(_) => return Err(RegimeError::BracketGap(pair[1].min_income)),
                None => return Err(RegimeError::BadOpenBracket),
            }
        }
        if self.brackets.last().is_some_and(|b| b.max_income.is_some()) {
            return Err(RegimeError::BadOpenBracket);
        }

        for bracket in &self.brackets {
            check_amount("min_income", bracket.min_income)?;
            check_amount("base_tax", bracket.base_tax)?;
            check_rate("bracket rate", bracket.rate)?;
        }
        for rates in &self.entity_rates {
            check_rate("marginal_rate", rates.marginal_rate)?;
            check_rate("optimization_rate", rates.optimization_rate)?;
        }
        check_rate("cess_rate", self.cess_rate)?;
        check_rate("minimum_tax_rate", self.minimum_tax_rate)?;

        Ok(())
    }
}

fn check_rate(
    name: &'static str,
    value: Decimal,
) -> Result<(), RegimeError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(RegimeError::RateOutOfRange { name, value });
    }
    Ok(())
}

fn check_amount(
    name: &'static str,
    value: Decimal,
) -> Result<(), RegimeError> {
    if value < Decimal::ZERO {
        return Err(RegimeError::NegativeAmount { name, value });
    }
    Ok(())
}

impl Default for TaxRegime {
    /// Built-in regime: the income-tax slabs with 4% cess and a 10% minimum
    /// tax floor. The open bracket's 0.30 rate is the unrecognized-entity
    /// default; recognized entities override it via `entity_rates`.
    fn default() -> Self {
        let bracket = |min: i64, max: Option<i64>, base: i64, rate_bp: i64| TaxBracket {
            min_income: Decimal::from(min),
            max_income: max.map(Decimal::from),
            base_tax: Decimal::from(base),
            rate: Decimal::new(rate_bp, 2),
        };
        let rates = |entity, marginal: i64, optimization: i64| EntityRates {
            entity,
            marginal_rate: Decimal::new(marginal, 2),
            optimization_rate: Decimal::new(optimization, 2),
        };

        Self {
            brackets: vec![
                bracket(0, Some(250_000), 0, 0),
                bracket(250_000, Some(500_000), 0, 5),
                bracket(500_000, Some(1_000_000), 12_500, 20),
                bracket(1_000_000, None, 112_500, 30),
            ],
            entity_rates: vec![
                rates(EntityType::SoleProprietorship, 30, 25),
                rates(EntityType::Partnership, 28, 28),
                rates(EntityType::PrivateLimited, 25, 30),
                rates(EntityType::Llp, 26, 27),
            ],
            cess_rate: Decimal::new(4, 2),
            minimum_tax_rate: Decimal::new(10, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_regime_validates() {
        assert_eq!(TaxRegime::default().validate(), Ok(()));
    }

    #[test]
    fn default_regime_has_rates_for_every_entity() {
        let regime = TaxRegime::default();

        for entity in EntityType::ALL {
            let rates = regime.rates_for(entity);
            assert_eq!(rates.entity, entity);
        }
    }

    #[test]
    fn default_regime_entity_rates_match_table() {
        let regime = TaxRegime::default();

        let pvt = regime.rates_for(EntityType::PrivateLimited);
        assert_eq!(pvt.marginal_rate, dec!(0.25));
        assert_eq!(pvt.optimization_rate, dec!(0.30));

        let llp = regime.rates_for(EntityType::Llp);
        assert_eq!(llp.marginal_rate, dec!(0.26));
        assert_eq!(llp.optimization_rate, dec!(0.27));
    }

    #[test]
    fn rates_for_missing_entity_falls_back_to_defaults() {
        let mut regime = TaxRegime::default();
        regime
            .entity_rates
            .retain(|r| r.entity != EntityType::Partnership);

        let rates = regime.rates_for(EntityType::Partnership);

        assert_eq!(rates.marginal_rate, dec!(0.30));
        assert_eq!(rates.optimization_rate, dec!(0.25));
    }

    #[test]
    fn validate_rejects_empty_brackets() {
        let mut regime = TaxRegime::default();
        regime.brackets.clear();

        assert_eq!(regime.validate(), Err(RegimeError::NoBrackets));
    }

    #[test]
    fn validate_rejects_nonzero_first_bracket() {
        let mut regime = TaxRegime::default();
        regime.brackets[0].min_income = dec!(100);

        assert_eq!(
            regime.validate(),
            Err(RegimeError::FirstBracketNotZero(dec!(100)))
        );
    }

    #[test]
    fn validate_rejects_bracket_gap() {
        let mut regime = TaxRegime::default();
        regime.brackets[1].min_income = dec!(300000);

        assert_eq!(regime.validate(), Err(RegimeError::BracketGap(dec!(300000))));
    }

    #[test]
    fn validate_rejects_closed_top_bracket() {
        let mut regime = TaxRegime::default();
        regime.brackets.last_mut().unwrap().max_income = Some(dec!(9999999));

        assert_eq!(regime.validate(), Err(RegimeError::BadOpenBracket));
    }

    #[test]
    fn validate_rejects_open_middle_bracket() {
        let mut regime = TaxRegime::default();
        regime.brackets[1].max_income = None;

        assert_eq!(regime.validate(), Err(RegimeError::BadOpenBracket));
    }

    #[test]
    fn validate_rejects_negative_base_tax() {
        let mut regime = TaxRegime::default();
        regime.brackets[0].base_tax = dec!(-100000);

        assert_eq!(
            regime.validate(),
            Err(RegimeError::NegativeAmount {
                name: "base_tax",
                value: dec!(-100000),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_min_income() {
        let regime = TaxRegime {
            brackets: vec![
                TaxBracket {
                    min_income: dec!(0),
                    max_income: Some(dec!(-5)),
                    base_tax: dec!(0),
                    rate: dec!(0),
                },
                TaxBracket {
                    min_income: dec!(-5),
                    max_income: None,
                    base_tax: dec!(0),
                    rate: dec!(0.30),
                },
            ],
            ..TaxRegime::default()
        };

        assert_eq!(
            regime.validate(),
            Err(RegimeError::NegativeAmount {
                name: "min_income",
                value: dec!(-5),
            })
        );
    }

    #[test]
    fn validate_rejects_out_of_range_cess() {
        let mut regime = TaxRegime::default();
        regime.cess_rate = dec!(1.5);

        assert_eq!(
            regime.validate(),
            Err(RegimeError::RateOutOfRange {
                name: "cess_rate",
                value: dec!(1.5),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_optimization_rate() {
        let mut regime = TaxRegime::default();
        regime.entity_rates[0].optimization_rate = dec!(-0.1);

        assert_eq!(
            regime.validate(),
            Err(RegimeError::RateOutOfRange {
                name: "optimization_rate",
                value: dec!(-0.1),
            })
        );
    }
}
