//! Line protocol for bulk ingest and export
//!
//! Each record frames one cell edit as `<address> <length> <content>\n`,
//! where `<length>` is the decimal byte count of `<content>`. Because the
//! content is length-prefixed it may embed newlines; the trailing newline is
//! a record terminator, not part of the content. Export writes each cell's
//! re-editable rendering, so a full export reimports to an equivalent sheet.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::SheetError;
use crate::sheet::Sheet;
use ripple_sheets_core::Address;
use thiserror::Error;

/// Hard cap on the content bytes of a single record
pub const MAX_CONTENT_LEN: usize = 4096;

/// Cap on the address token of a record
const MAX_ADDRESS_LEN: usize = 50;

/// Result type for wire protocol operations
pub type WireResult<T> = std::result::Result<T, WireError>;

/// Errors surfaced while reading or writing framed records
#[derive(Debug, Error)]
pub enum WireError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Framing violation: bad token, bad terminator, or truncated content
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Declared or actual content length above [`MAX_CONTENT_LEN`]
    #[error("Content length {0} exceeds the {MAX_CONTENT_LEN} byte limit")]
    ContentTooLong(usize),

    /// The record was well-framed but the sheet rejected the edit
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

/// Framed record reader
pub struct WireReader;

impl WireReader {
    /// Ingest every record from a file into a sheet.
    pub fn read_file<P: AsRef<Path>>(path: P, sheet: &mut Sheet) -> WireResult<usize> {
        let mut file = File::open(path)?;
        Self::import(&mut file, sheet)
    }

    /// Ingest records until clean end of input, applying each to the sheet.
    /// Returns the number of records applied.
    pub fn import<R: Read>(reader: &mut R, sheet: &mut Sheet) -> WireResult<usize> {
        let mut count = 0;
        while Self::read_into(reader, sheet)? {
            count += 1;
        }
        Ok(count)
    }

    /// Read one record and apply it to the sheet. Returns false on clean end
    /// of input.
    pub fn read_into<R: Read>(reader: &mut R, sheet: &mut Sheet) -> WireResult<bool> {
        match Self::read_record(reader)? {
            None => Ok(false),
            Some((address, content)) => {
                sheet.set_content(&address, &content)?;
                Ok(true)
            }
        }
    }

    /// Read one framed record as (address, content). Returns `None` on clean
    /// end of input before any token of a record.
    pub fn read_record<R: Read>(reader: &mut R) -> WireResult<Option<(String, String)>> {
        let address = match Self::read_token(reader, MAX_ADDRESS_LEN)? {
            None => return Ok(None),
            Some(token) => token,
        };

        let length_token = Self::read_token(reader, MAX_ADDRESS_LEN)?.ok_or_else(|| {
            WireError::MalformedRecord("truncated record: missing content length".to_string())
        })?;
        let length: usize = length_token.parse().map_err(|_| {
            WireError::MalformedRecord(format!("invalid content length '{length_token}'"))
        })?;
        if length > MAX_CONTENT_LEN {
            return Err(WireError::ContentTooLong(length));
        }

        let mut bytes = vec![0u8; length];
        reader.read_exact(&mut bytes).map_err(|error| {
            if error.kind() == io::ErrorKind::UnexpectedEof {
                WireError::MalformedRecord(format!(
                    "truncated record: content shorter than declared length {length}"
                ))
            } else {
                WireError::Io(error)
            }
        })?;
        let content = String::from_utf8(bytes)
            .map_err(|_| WireError::MalformedRecord("content is not valid UTF-8".to_string()))?;

        // The terminator is required except at end of input
        match Self::read_byte(reader)? {
            None | Some(b'\n') => {}
            Some(byte) => {
                return Err(WireError::MalformedRecord(format!(
                    "expected record terminator, found byte {byte:#04x}"
                )))
            }
        }

        Ok(Some((address, content)))
    }

    /// Read one whitespace-delimited token, skipping leading whitespace.
    /// The delimiting byte is consumed. `None` means end of input before any
    /// token byte.
    fn read_token<R: Read>(reader: &mut R, cap: usize) -> WireResult<Option<String>> {
        let mut byte = loop {
            match Self::read_byte(reader)? {
                None => return Ok(None),
                Some(b) if b.is_ascii_whitespace() => continue,
                Some(b) => break b,
            }
        };

        let mut token = Vec::new();
        loop {
            token.push(byte);
            if token.len() > cap {
                return Err(WireError::MalformedRecord(format!(
                    "token exceeds {cap} bytes"
                )));
            }
            match Self::read_byte(reader)? {
                None => break,
                Some(b) if b.is_ascii_whitespace() => break,
                Some(b) => byte = b,
            }
        }

        let token = String::from_utf8(token)
            .map_err(|_| WireError::MalformedRecord("token is not valid UTF-8".to_string()))?;
        Ok(Some(token))
    }

    fn read_byte<R: Read>(reader: &mut R) -> WireResult<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(error.into()),
            }
        }
    }
}

/// Framed record writer
pub struct WireWriter;

impl WireWriter {
    /// Export a rectangle of a sheet to a file.
    pub fn write_file<P: AsRef<Path>>(
        path: P,
        sheet: &Sheet,
        start: &Address,
        end: &Address,
    ) -> WireResult<()> {
        let mut file = File::create(path)?;
        Self::write_range(&mut file, sheet, start, end)
    }

    /// Export every non-empty cell in the closed rectangle, one record per
    /// cell, using the re-editable rendering so formulas survive the trip.
    pub fn write_range<W: Write>(
        writer: &mut W,
        sheet: &Sheet,
        start: &Address,
        end: &Address,
    ) -> WireResult<()> {
        for (addr, cell) in sheet.cells_in_range(start, end) {
            let content = cell.edit_content();
            if content.is_empty() {
                continue;
            }
            Self::write_record(writer, &addr.to_string(), &content)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write one framed record.
    pub fn write_record<W: Write>(
        writer: &mut W,
        address: &str,
        content: &str,
    ) -> WireResult<()> {
        if content.len() > MAX_CONTENT_LEN {
            return Err(WireError::ContentTooLong(content.len()));
        }
        write!(writer, "{} {} {}\n", address, content.len(), content)?;
        Ok(())
    }
}
