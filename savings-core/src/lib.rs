pub mod calculations;
pub mod models;

pub use calculations::estimator::{EstimatorError, SavingsEstimator};
pub use models::*;
