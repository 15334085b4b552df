//! Error types for the financial query responder

use thiserror::Error;

/// Result type alias for responder operations
pub type Result<T> = std::result::Result<T, ResponderError>;

#[derive(Error, Debug)]
pub enum ResponderError {

    // =============================
    // Data Source Errors
    // =============================

    #[error("Data source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Malformed data source: {0}")]
    MalformedSource(String),

    // =============================
    // Configuration Errors
    // =============================

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
