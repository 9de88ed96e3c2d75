//! Presentation adapter between the CLI and the pure estimator.
//!
//! The presenter owns nothing ambient: it is constructed with the regime and
//! the analytics sink it should use, calls the estimator, renders the result
//! lines, and records one `tax_calculation` event per completed estimate.
//! Failed estimates record nothing.

use rust_decimal::Decimal;

use savings_core::{CalculationResult, EntityType, EstimatorError, SavingsEstimator, TaxRegime};

use crate::analytics::{AnalyticsEvent, AnalyticsSink};
use crate::csv_loader::Scenario;
use crate::format::format_currency;

pub struct Presenter<'a> {
    regime: &'a TaxRegime,
    sink: &'a dyn AnalyticsSink,
}

impl<'a> Presenter<'a> {
    pub fn new(
        regime: &'a TaxRegime,
        sink: &'a dyn AnalyticsSink,
    ) -> Self {
        Self { regime, sink }
    }

    /// Runs one estimate and returns the rendered result block.
    ///
    /// # Errors
    ///
    /// Propagates [`EstimatorError`] from the calculation; no analytics
    /// event is recorded in that case.
    pub fn run_single(
        &self,
        income: Decimal,
        entity: EntityType,
    ) -> Result<String, EstimatorError> {
        let estimator = SavingsEstimator::new(self.regime);
        let result = estimator.estimate(income, entity)?;

        self.sink.record(&AnalyticsEvent::tax_calculation(
            income,
            entity,
            result.savings,
        ));

        Ok(render(income, entity, &result))
    }

    /// Runs every scenario in order, returning one rendered block per row.
    ///
    /// # Errors
    ///
    /// Stops at the first failing scenario. Events for scenarios that
    /// already completed stay recorded.
    pub fn run_batch(
        &self,
        scenarios: &[Scenario],
    ) -> Result<Vec<String>, EstimatorError> {
        scenarios
            .iter()
            .map(|s| self.run_single(s.income, s.entity))
            .collect()
    }
}

fn render(
    income: Decimal,
    entity: EntityType,
    result: &CalculationResult,
) -> String {
    format!(
        "{entity} @ {}\n  Current tax liability:   {}\n  Optimized tax liability: {}\n  Potential savings:       {}",
        format_currency(income),
        format_currency(result.current_tax),
        format_currency(result.optimized_tax),
        format_currency(result.savings),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::analytics::{MemorySink, TAX_CALCULATION};

    #[test]
    fn run_single_renders_formatted_block() {
        let regime = TaxRegime::default();
        let sink = MemorySink::default();
        let presenter = Presenter::new(&regime, &sink);

        let output = presenter
            .run_single(dec!(1500000), EntityType::PrivateLimited)
            .unwrap();

        assert_eq!(
            output,
            "private-limited @ ₹ 15,00,000\n\
             \x20 Current tax liability:   ₹ 2,47,000\n\
             \x20 Optimized tax liability: ₹ 1,72,900\n\
             \x20 Potential savings:       ₹ 74,100"
        );
    }

    #[test]
    fn run_single_renders_negative_savings() {
        let regime = TaxRegime::default();
        let sink = MemorySink::default();
        let presenter = Presenter::new(&regime, &sink);

        let output = presenter
            .run_single(dec!(400000), EntityType::PrivateLimited)
            .unwrap();

        assert!(output.contains("Potential savings:       - ₹ 32,200"));
    }

    #[test]
    fn run_single_records_one_event() {
        let regime = TaxRegime::default();
        let sink = MemorySink::default();
        let presenter = Presenter::new(&regime, &sink);

        presenter
            .run_single(dec!(1500000), EntityType::SoleProprietorship)
            .unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, TAX_CALCULATION);
        assert_eq!(events[0].income, dec!(1500000));
        assert_eq!(events[0].business_type, EntityType::SoleProprietorship);
        assert_eq!(events[0].savings, dec!(68250));
    }

    #[test]
    fn failed_estimate_records_no_event() {
        let regime = TaxRegime::default();
        let sink = MemorySink::default();
        let presenter = Presenter::new(&regime, &sink);

        let result = presenter.run_single(dec!(-1), EntityType::Llp);

        assert_eq!(result, Err(EstimatorError::NegativeIncome(dec!(-1))));
        assert!(sink.events().is_empty());
    }

    #[test]
    fn run_batch_preserves_scenario_order() {
        let regime = TaxRegime::default();
        let sink = MemorySink::default();
        let presenter = Presenter::new(&regime, &sink);
        let scenarios = [
            Scenario {
                income: dec!(400000),
                entity: EntityType::PrivateLimited,
            },
            Scenario {
                income: dec!(1500000),
                entity: EntityType::Llp,
            },
        ];

        let blocks = presenter.run_batch(&scenarios).unwrap();

        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("private-limited @ ₹ 4,00,000"));
        assert!(blocks[1].starts_with("llp @ ₹ 15,00,000"));
        assert_eq!(sink.events().len(), 2);
    }
}
