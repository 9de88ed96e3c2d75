mod entity_type;
mod estimate;
mod regime;
mod tax_bracket;

pub use entity_type::EntityType;
pub use estimate::CalculationResult;
pub use regime::{EntityRates, RegimeError, TaxRegime};
pub use tax_bracket::TaxBracket;
