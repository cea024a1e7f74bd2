//! Prelude module - common imports for ripple-sheets users
//!
//! ```rust
//! use ripple_sheets::prelude::*;
//! ```

pub use crate::{
    // Main types
    Address,
    Cell,
    // Formula types
    FormulaError,
    FormulaExpr,
    Sheet,
    // Error types
    SheetError,
    SheetResult,
    // I/O types
    WireError,
    WireReader,
    WireWriter,
};
