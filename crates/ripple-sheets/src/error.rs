//! Sheet-level error types

use ripple_sheets_formula::FormulaError;
use thiserror::Error;

/// Result type for sheet operations
pub type SheetResult<T> = std::result::Result<T, SheetError>;

/// Errors surfaced by sheet queries and edits
///
/// Address validation fails synchronously at the boundary; formula errors are
/// the cached per-cell failures observed through the numeric accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// Malformed address text
    #[error(transparent)]
    Address(#[from] ripple_sheets_core::Error),

    /// A cell-level failure (text cell read numerically, cached formula error)
    #[error(transparent)]
    Cell(#[from] FormulaError),
}
