pub mod analytics;
pub mod config;
pub mod csv_loader;
pub mod format;
pub mod presenter;
