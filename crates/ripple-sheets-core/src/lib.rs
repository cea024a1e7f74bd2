//! # ripple-sheets-core
//!
//! Core addressing types for the ripple-sheets reactive grid.
//!
//! This crate provides the fundamental types shared by the parser, evaluator,
//! and sheet crates:
//! - [`Address`] - A cell coordinate ("A1" through "ZZ4294967295")
//! - [`Error`] - Address validation errors
//!
//! ## Example
//!
//! ```rust
//! use ripple_sheets_core::Address;
//!
//! let addr = Address::parse("b3").unwrap();
//! assert_eq!(addr.to_string(), "B3");
//! assert_eq!(addr.next_column().unwrap().to_string(), "C3");
//! ```

pub mod address;
pub mod error;

pub use address::Address;
pub use error::{Error, Result};

/// Number of addressable columns ("A" through "ZZ")
pub const MAX_COLS: u16 = 26 + 26 * 26;
