//! Error types for ripple-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling cell addresses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed or out-of-range cell address text
    #[error("Invalid cell address '{0}'")]
    InvalidAddress(String),

    /// Column advance past the last addressable column ("ZZ")
    #[error("No more columns after '{0}'")]
    ColumnExhausted(String),
}
