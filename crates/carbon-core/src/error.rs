//! Error types for the carbon ledger

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No data available: {0}")]
    EmptyDataset(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// True for the "nothing to aggregate" outcome, which callers usually
    /// report as a message rather than a failure
    pub fn is_empty_dataset(&self) -> bool {
        matches!(self, Error::EmptyDataset(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
