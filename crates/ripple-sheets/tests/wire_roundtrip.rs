//! Tests for export/reimport through the framed line protocol

use ripple_sheets::prelude::*;
use std::io::Cursor;

fn export(sheet: &Sheet) -> Vec<u8> {
    let mut out = Vec::new();
    let start = Address::parse("A1").unwrap();
    WireWriter::write_range(&mut out, sheet, &start, &sheet.bounds()).unwrap();
    out
}

/// Test that a full export reimports to an equivalent sheet
#[test]
fn test_export_reimport_reproduces_the_sheet() {
    let mut sheet = Sheet::new();
    sheet.set_content("A1", "5").unwrap();
    sheet.set_content("B1", "some text").unwrap();
    sheet.set_content("A2", "=A1*2").unwrap();
    sheet.set_content("C3", "=A2+A1").unwrap();

    let exported = export(&sheet);

    let mut reimported = Sheet::new();
    WireReader::import(&mut Cursor::new(&exported), &mut reimported).unwrap();

    for addr in ["A1", "B1", "A2", "C3", "D4"] {
        assert_eq!(
            sheet.content_at(addr).unwrap(),
            reimported.content_at(addr).unwrap(),
            "content at {addr}"
        );
        assert_eq!(
            sheet.edit_at(addr).unwrap(),
            reimported.edit_at(addr).unwrap(),
            "edit content at {addr}"
        );
    }
    assert_eq!(sheet.value_at("C3").unwrap(), reimported.value_at("C3").unwrap());
    assert_eq!(sheet.bounds(), reimported.bounds());

    // The reimported sheet is still reactive
    reimported.set_content("A1", "10").unwrap();
    assert_eq!(reimported.value_at("A2").unwrap(), 20.0);
    assert_eq!(reimported.value_at("C3").unwrap(), 30.0);
}

/// Test that formulas export as their source text, not their value
#[test]
fn test_formulas_export_as_source() {
    let mut sheet = Sheet::new();
    sheet.set_content("A1", "2").unwrap();
    sheet.set_content("B1", "=A1/4").unwrap();

    let exported = String::from_utf8(export(&sheet)).unwrap();
    assert_eq!(exported, "A1 8 2.000000\nB1 5 =A1/4\n");
}

/// Test that text containing spaces and newlines survives the round trip
#[test]
fn test_text_with_whitespace_round_trips() {
    let mut sheet = Sheet::new();
    sheet.set_content("A1", "two words").unwrap();
    sheet.set_content("A2", "line one\nline two").unwrap();

    let exported = export(&sheet);

    let mut reimported = Sheet::new();
    let count = WireReader::import(&mut Cursor::new(&exported), &mut reimported).unwrap();
    assert_eq!(count, 2);
    assert_eq!(reimported.content_at("A1").unwrap(), "two words");
    assert_eq!(reimported.content_at("A2").unwrap(), "line one\nline two");
}

/// Test that a partial range exports only its rectangle
#[test]
fn test_partial_range_export() {
    let mut sheet = Sheet::new();
    sheet.set_content("A1", "1").unwrap();
    sheet.set_content("B2", "2").unwrap();
    sheet.set_content("C3", "3").unwrap();

    let mut out = Vec::new();
    let start = Address::parse("A1").unwrap();
    let end = Address::parse("B2").unwrap();
    WireWriter::write_range(&mut out, &sheet, &start, &end).unwrap();

    let mut reimported = Sheet::new();
    WireReader::import(&mut Cursor::new(&out), &mut reimported).unwrap();
    assert_eq!(reimported.value_at("A1").unwrap(), 1.0);
    assert_eq!(reimported.value_at("B2").unwrap(), 2.0);
    assert_eq!(reimported.content_at("C3").unwrap(), "");
}

/// Test that framing errors abort the import with context
#[test]
fn test_malformed_stream_aborts_import() {
    let mut sheet = Sheet::new();
    let mut input = Cursor::new("A1 1 5\nB1 notanumber x\n");
    let error = WireReader::import(&mut input, &mut sheet).unwrap_err();
    assert!(matches!(error, WireError::MalformedRecord(_)));

    // Records before the failure were applied
    assert_eq!(sheet.value_at("A1").unwrap(), 5.0);
}
