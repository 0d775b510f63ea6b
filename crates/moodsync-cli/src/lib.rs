//! CLI library components for the mood diary synchronizer.

pub mod logging;
pub mod summary;
pub mod types;
