//! Tax savings estimation for business entities.
//!
//! This module implements the two calculations behind the savings estimate:
//! the current liability under the progressive slab table, and the optimized
//! liability after the entity-specific discount with a minimum-tax floor.
//!
//! # Current tax
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Find the slab containing the income (`min < income <= max`) |
//! | 2    | Slab tax = base tax + (income − slab min) × rate |
//! | 3    | In the open top slab, the rate is the entity's marginal rate |
//! | 4    | Add cess: tax += tax × cess rate |
//! | 5    | Round to the nearest whole unit |
//!
//! # Optimized tax
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Base = current tax (already rounded) |
//! | 2    | Discounted = base × (1 − optimization rate) |
//! | 3    | Floor = income × minimum tax rate |
//! | 4    | Result = max(discounted, floor), rounded |
//!
//! Savings is the signed difference `current − optimized`; it goes negative
//! when the floor exceeds the discounted base tax.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use savings_core::{EntityType, SavingsEstimator, TaxRegime};
//!
//! let regime = TaxRegime::default();
//! let estimator = SavingsEstimator::new(&regime);
//!
//! let result = estimator
//!     .estimate(dec!(1500000), EntityType::PrivateLimited)
//!     .unwrap();
//!
//! assert_eq!(result.current_tax, dec!(247000));
//! assert_eq!(result.optimized_tax, dec!(172900));
//! assert_eq!(result.savings, dec!(74100));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::{max, round_to_unit};
use crate::models::{CalculationResult, EntityType, TaxRegime};

/// Errors that can occur during a savings estimate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimatorError {
    /// Income must be zero or positive. Negative income is rejected at every
    /// entry point rather than coerced to zero.
    #[error("income must be non-negative, got {0}")]
    NegativeIncome(Decimal),

    /// The regime has no brackets configured.
    #[error("no tax brackets configured")]
    NoTaxBrackets,

    /// The bracket table has a gap at the given income.
    #[error("no tax bracket found for income {0}")]
    NoMatchingBracket(Decimal),
}

/// Calculator for current and optimized tax liability.
///
/// Borrows a [`TaxRegime`] and holds no other state; every call is
/// independent and deterministic, so repeated estimates with identical
/// inputs return identical results.
#[derive(Debug, Clone)]
pub struct SavingsEstimator<'a> {
    regime: &'a TaxRegime,
}

impl<'a> SavingsEstimator<'a> {
    /// Creates an estimator over the given regime.
    ///
    /// The regime should be validated ([`TaxRegime::validate`]) at load
    /// time; the estimator still reports an empty or gapped table as an
    /// error rather than panicking.
    pub fn new(regime: &'a TaxRegime) -> Self {
        Self { regime }
    }

    /// Current tax liability: progressive slab tax plus cess, rounded to the
    /// nearest whole unit. Always non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`EstimatorError`] for negative income or a malformed bracket
    /// table.
    pub fn current_tax(
        &self,
        income: Decimal,
        entity: EntityType,
    ) -> Result<Decimal, EstimatorError> {
        self.check_income(income)?;

        let slab_tax = self.slab_tax(income, entity)?;
        let with_cess = slab_tax + slab_tax * self.regime.cess_rate;

        Ok(round_to_unit(with_cess))
    }

    /// Optimized tax liability: current tax discounted by the entity's
    /// optimization rate, floored at `income × minimum_tax_rate`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::current_tax`].
    pub fn optimized_tax(
        &self,
        income: Decimal,
        entity: EntityType,
    ) -> Result<Decimal, EstimatorError> {
        let base = self.current_tax(income, entity)?;
        let rates = self.regime.rates_for(entity);

        let discounted = base * (Decimal::ONE - rates.optimization_rate);
        let floor = income * self.regime.minimum_tax_rate;

        Ok(round_to_unit(max(discounted, floor)))
    }

    /// Combined estimate: current tax, optimized tax, and their signed
    /// difference.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::current_tax`].
    pub fn estimate(
        &self,
        income: Decimal,
        entity: EntityType,
    ) -> Result<CalculationResult, EstimatorError> {
        let current_tax = self.current_tax(income, entity)?;
        let optimized_tax = self.optimized_tax(income, entity)?;

        Ok(CalculationResult {
            current_tax,
            optimized_tax,
            savings: current_tax - optimized_tax,
        })
    }

    fn check_income(
        &self,
        income: Decimal,
    ) -> Result<(), EstimatorError> {
        if income < Decimal::ZERO {
            return Err(EstimatorError::NegativeIncome(income));
        }
        Ok(())
    }

    /// Progressive slab tax before cess.
    fn slab_tax(
        &self,
        income: Decimal,
        entity: EntityType,
    ) -> Result<Decimal, EstimatorError> {
        if self.regime.brackets.is_empty() {
            return Err(EstimatorError::NoTaxBrackets);
        }
        if income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let bracket = self
            .regime
            .brackets
            .iter()
            .find(|b| income > b.min_income && b.max_income.is_none_or(|max| income <= max))
            .ok_or(EstimatorError::NoMatchingBracket(income))?;

        // The open top slab uses the entity's marginal rate; closed slabs
        // apply to every entity type equally.
        let rate = if bracket.max_income.is_none() {
            self.regime.rates_for(entity).marginal_rate
        } else {
            bracket.rate
        };

        Ok(bracket.base_tax + (income - bracket.min_income) * rate)
    }
}
