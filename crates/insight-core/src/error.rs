//! Error types for the market insight workspace.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),
}

/// Errors raised while loading or validating OHLCV records.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No data available at {0}")]
    NoDataAvailable(String),

    #[error("Record {index} is missing required field `{field}`")]
    Validation { index: usize, field: &'static str },

    #[error("Unsupported data format: {0}")]
    UnsupportedFormat(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Indicator calculation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Non-finite {field} value at index {index}")]
    NonFiniteInput { field: &'static str, index: usize },
}

/// Result type alias for workspace operations.
pub type InsightResult<T> = Result<T, InsightError>;
