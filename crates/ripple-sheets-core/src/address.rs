//! Cell address type
//!
//! Addresses combine a column of one or two letters ("A" through "ZZ") with a
//! 1-based row number. Columns are stored as a 0-based index so that the
//! shorter-before-longer, letterwise column ordering used for bounding-box
//! computation coincides with plain numeric ordering ("Z" = 25 < "AA" = 26).

use crate::error::{Error, Result};
use crate::MAX_COLS;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Longest accepted column, as letters
const LAST_COLUMN: &str = "ZZ";

/// Maximum number of letters in a column
const MAX_COLUMN_LETTERS: usize = 2;

/// A cell address (e.g., "A1", "ZZ42")
///
/// Addresses are immutable value types; every operation returns a new address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    /// Row number (1-based, as displayed)
    pub row: u32,
    /// Column index (0-based, A=0, Z=25, AA=26, ..., ZZ=701)
    pub col: u16,
}

impl Address {
    /// Create an address from a column index and a 1-based row.
    ///
    /// The caller is responsible for `col < MAX_COLS` and `row >= 1`;
    /// [`Address::parse`] enforces both for untrusted text.
    pub fn new(col: u16, row: u32) -> Self {
        Self { row, col }
    }

    /// Parse an address from A1-style notation.
    ///
    /// Input is uppercase-normalized; columns longer than two letters, missing
    /// or non-numeric rows, and row 0 are rejected.
    ///
    /// # Examples
    /// ```
    /// use ripple_sheets_core::Address;
    ///
    /// let addr = Address::parse("aa10").unwrap();
    /// assert_eq!(addr.col, 26);
    /// assert_eq!(addr.row, 10);
    /// assert!(Address::parse("AAA1").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }

        if pos == 0 {
            return Err(Error::InvalidAddress(s.to_string()));
        }
        if pos > MAX_COLUMN_LETTERS {
            return Err(Error::InvalidAddress(s.to_string()));
        }

        let col = Self::letters_to_column(&s[..pos])?;

        let row_str = &s[pos..];
        if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(s.to_string()));
        }
        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(s.to_string()))?;
        if row == 0 {
            return Err(Error::InvalidAddress(s.to_string()));
        }

        Ok(Self { row, col })
    }

    /// Convert column letters to an index (A = 0, Z = 25, AA = 26, ZZ = 701).
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() || letters.len() > MAX_COLUMN_LETTERS {
            return Err(Error::InvalidAddress(letters.to_string()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(letters.to_string()));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        }

        Ok((col - 1) as u16)
    }

    /// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, 701 = ZZ).
    pub fn column_to_letters(col: u16) -> String {
        let mut result = String::new();
        let mut n = col as u32 + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// This address's column, as letters.
    pub fn column_letters(&self) -> String {
        Self::column_to_letters(self.col)
    }

    /// Compare by column only; the row is deliberately ignored.
    ///
    /// Shorter columns always precede longer ones, equal-length columns compare
    /// letter by letter. Used for bounding-box computation, not for sorting
    /// cells.
    pub fn cmp_column(&self, other: &Address) -> Ordering {
        self.col.cmp(&other.col)
    }

    /// True if this address's column is at or before the other's.
    pub fn column_le(&self, other: &Address) -> bool {
        self.col <= other.col
    }

    /// The address with its column advanced by one in base-26 (Z→AA, AZ→BA).
    ///
    /// Fails once the column would pass "ZZ".
    pub fn next_column(&self) -> Result<Address> {
        if self.col + 1 >= MAX_COLS {
            debug_assert_eq!(self.column_letters(), LAST_COLUMN);
            return Err(Error::ColumnExhausted(self.column_letters()));
        }
        Ok(Address::new(self.col + 1, self.row))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letters(), self.row)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
