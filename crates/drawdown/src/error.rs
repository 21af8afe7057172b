//! Error types for drawdown analysis.

use thiserror::Error;

/// Result type for drawdown operations.
pub type Result<T> = std::result::Result<T, DrawdownError>;

/// Errors that can occur while loading, computing, or writing drawdown statistics.
#[derive(Debug, Error)]
pub enum DrawdownError {
    /// The PnL series has no rows
    #[error("Empty input: no PnL records to analyze")]
    EmptyInput,

    /// A PnL value is NaN or infinite
    #[error("Non-finite pnl at row {row}")]
    NonFinitePnl {
        /// Zero-based row index
        row: usize,
    },

    /// Configuration values outside their valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Missing required column in input data
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A row in the input table could not be interpreted
    #[error("Invalid row {row}: {reason}")]
    InvalidRow {
        /// Zero-based row index
        row: usize,
        /// What was wrong with the row
        reason: String,
    },

    /// Input and derived rows do not line up
    #[error("Length mismatch: {records} input rows, {derived} derived rows")]
    LengthMismatch {
        /// Number of input rows
        records: usize,
        /// Number of derived rows
        derived: usize,
    },

    /// A path that cannot be expressed as a `file://` URL
    #[error("Cannot build a file link for path: {0}")]
    InvalidPath(String),

    /// Polars DataFrame error
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}
