//! Tax calculation modules for the savings estimator.
//!
//! `common` holds shared numeric helpers; `estimator` implements the
//! progressive slab calculation and the optimization model.

pub mod common;
pub mod estimator;

pub use estimator::{EstimatorError, SavingsEstimator};
