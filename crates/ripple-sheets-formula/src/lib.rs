//! # ripple-sheets-formula
//!
//! Formula parser and evaluator for the ripple-sheets reactive grid.
//!
//! This crate provides:
//! - Formula parsing (text → expression tree)
//! - Reference extraction (expression tree → cell addresses)
//! - Formula evaluation (expression tree → number, against a cell source)
//!
//! ## Example
//!
//! ```rust,ignore
//! use ripple_sheets_formula::{evaluate, parse_formula};
//!
//! let expr = parse_formula("=A1+(B2*C3)")?;
//! let addrs = expr.referenced_cells()?;
//! let result = evaluate(&expr, &sheet)?;
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{BinaryOperator, FormulaExpr};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, ReferenceResolver};
pub use parser::parse_formula;
