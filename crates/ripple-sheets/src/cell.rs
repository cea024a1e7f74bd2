//! Cell state and accessors
//!
//! A cell owns one address's content together with its cached value or error
//! and its position in the dependency graph. Graph edges are arena handles
//! ([`CellId`]) into the owning [`Sheet`](crate::Sheet); the sheet performs
//! all graph mutation and recalculation, the cell only carries state.

use ripple_sheets_core::Address;
use ripple_sheets_formula::{FormulaError, FormulaExpr, FormulaResult};

/// Stable handle to a cell slot in the sheet's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(pub(crate) usize);

/// Format a number for display content, fixed decimal precision
pub(crate) fn format_number(value: f64) -> String {
    format!("{:.6}", value)
}

/// The content variant a cell currently holds
#[derive(Debug)]
pub(crate) enum CellState {
    /// No content; kept alive only while something still depends on it
    Transient,
    /// Numeric literal
    Number(f64),
    /// Opaque text
    Text(String),
    /// Formula with cached result
    Formula(FormulaState),
}

/// State of a formula cell
#[derive(Debug)]
pub(crate) struct FormulaState {
    /// Original formula text, as entered
    pub(crate) source: String,
    /// Parsed expression tree; `None` when parsing or reference resolution
    /// failed
    pub(crate) expr: Option<FormulaExpr>,
    /// Cached numeric result of the last successful evaluation
    pub(crate) value: f64,
    /// Cached parse/reference/evaluation error
    pub(crate) error: Option<FormulaError>,
}

/// A single cell of the grid
#[derive(Debug)]
pub struct Cell {
    pub(crate) address: Address,
    pub(crate) state: CellState,
    /// Cells this cell's formula reads from (duplicates preserved)
    pub(crate) upstream: Vec<CellId>,
    /// Cells whose formulas read from this cell (inverse of upstream)
    pub(crate) downstream: Vec<CellId>,
    /// Recursion guard: this cell is mid-recalculation
    pub(crate) recalculating: bool,
    /// Recursion guard: cycle error propagation already ran this pass
    pub(crate) cycle_visited: bool,
}

impl Cell {
    pub(crate) fn new(address: Address) -> Self {
        Self {
            address,
            state: CellState::Transient,
            upstream: Vec::new(),
            downstream: Vec::new(),
            recalculating: false,
            cycle_visited: false,
        }
    }

    /// This cell's address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// True if the cell has no content of its own.
    pub fn is_transient(&self) -> bool {
        matches!(self.state, CellState::Transient)
    }

    /// True if the cell holds a formula.
    pub fn is_formula(&self) -> bool {
        matches!(self.state, CellState::Formula(_))
    }

    /// The cached formula error, if the cell is a formula in an error state.
    pub fn formula_error(&self) -> Option<&FormulaError> {
        match &self.state {
            CellState::Formula(formula) => formula.error.as_ref(),
            _ => None,
        }
    }

    /// The cell's numeric value.
    ///
    /// Transient cells are worth 0. Text cells fail with
    /// [`FormulaError::NotNumeric`]; formula cells in an error state fail with
    /// the cached error wrapped with this cell's address.
    pub fn value(&self) -> FormulaResult<f64> {
        match &self.state {
            CellState::Transient => Ok(0.0),
            CellState::Number(value) => Ok(*value),
            CellState::Text(_) => Err(FormulaError::NotNumeric(self.address.to_string())),
            CellState::Formula(formula) => match &formula.error {
                Some(error) => Err(FormulaError::Evaluation {
                    address: self.address.to_string(),
                    message: error.to_string(),
                }),
                None => Ok(formula.value),
            },
        }
    }

    /// The evaluated/literal value rendered for read-only display.
    ///
    /// Numbers use fixed decimal precision; formula errors render as
    /// `"<address>: <message>"`.
    pub fn display_content(&self) -> String {
        match &self.state {
            CellState::Transient => String::new(),
            CellState::Number(value) => format_number(*value),
            CellState::Text(text) => text.clone(),
            CellState::Formula(formula) => match &formula.error {
                Some(error) => format!("{}: {}", self.address, error),
                None => format_number(formula.value),
            },
        }
    }

    /// The value rendered for re-editing: the original formula text for
    /// formulas, the literal text otherwise.
    pub fn edit_content(&self) -> String {
        match &self.state {
            CellState::Transient => String::new(),
            CellState::Number(value) => format_number(*value),
            CellState::Text(text) => text.clone(),
            CellState::Formula(formula) => formula.source.clone(),
        }
    }
}
