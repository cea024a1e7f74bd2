//! # ripple-sheets
//!
//! An in-memory reactive grid of cells with dependency-tracked recalculation.
//!
//! Cells hold numbers, opaque text, or four-function formulas over cell
//! references. Editing a cell rewires the dependency graph and immediately
//! recalculates every transitive dependent; reference cycles are contained
//! as per-cell errors rather than aborting the edit. A framed line protocol
//! handles bulk ingest and round-trippable export.
//!
//! ## Example
//!
//! ```rust
//! use ripple_sheets::prelude::*;
//!
//! let mut sheet = Sheet::new();
//!
//! // Set literal values
//! sheet.set_content("A2", "5").unwrap();
//! sheet.set_content("A3", "6").unwrap();
//!
//! // Set a formula; it recalculates whenever an input changes
//! sheet.set_content("A1", "=A2+A3").unwrap();
//! assert_eq!(sheet.value_at("A1").unwrap(), 11.0);
//!
//! sheet.set_content("A2", "10").unwrap();
//! assert_eq!(sheet.value_at("A1").unwrap(), 16.0);
//! ```

pub mod cell;
pub mod error;
pub mod prelude;
pub mod sheet;
pub mod wire;

// Re-export sheet types
pub use cell::{Cell, CellId};
pub use error::{SheetError, SheetResult};
pub use sheet::{Sheet, UpdateCallback};

// Re-export core types
pub use ripple_sheets_core::{Address, Error, Result, MAX_COLS};

// Re-export formula types
pub use ripple_sheets_formula::{
    evaluate, parse_formula, BinaryOperator, FormulaError, FormulaExpr, FormulaResult,
    ReferenceResolver,
};

// Re-export wire protocol types
pub use wire::{WireError, WireReader, WireResult, WireWriter, MAX_CONTENT_LEN};
