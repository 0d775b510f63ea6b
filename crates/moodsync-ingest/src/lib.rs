pub mod csv_source;

pub use csv_source::{CsvSourceOptions, read_mood_csv};

use thiserror::Error;

/// Failures reading the source export.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
