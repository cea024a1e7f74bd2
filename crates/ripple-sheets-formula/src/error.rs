//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
///
/// These are contained at the cell level: a failed parse or evaluation is
/// cached on the owning cell and rendered as its display content, it never
/// aborts a recalculation cascade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Malformed formula syntax
    #[error("Parse error: {0}")]
    Parse(String),

    /// A referenced identifier is not a valid cell address
    #[error("Cannot resolve reference '{0}' to a cell address")]
    UnresolvedReference(String),

    /// Numeric access on a text cell
    #[error("Cannot get numeric value from {0}")]
    NotNumeric(String),

    /// The formula participates in a reference cycle
    #[error("Cyclical equations detected.")]
    CyclicalDependency,

    /// An upstream cell's failure, observed during evaluation
    #[error("{address}: {message}")]
    Evaluation { address: String, message: String },

    /// Malformed expression tree. An invariant violation, never
    /// user-triggered; the tree types make this unrepresentable today.
    #[error("Malformed expression: {0}")]
    Structural(String),
}
