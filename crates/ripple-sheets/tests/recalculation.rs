//! Tests for reactive recalculation through the dependency graph

use ripple_sheets::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Test numeric literals and the numeric accessor
#[test]
fn test_numeric_set_and_get() {
    let mut sheet = Sheet::new();
    sheet.set_content("A1", "5").unwrap();
    sheet.set_content("B1", "-2.5").unwrap();

    assert_eq!(sheet.value_at("A1").unwrap(), 5.0);
    assert_eq!(sheet.value_at("B1").unwrap(), -2.5);
    assert_eq!(sheet.content_at("A1").unwrap(), "5.000000");
    assert_eq!(sheet.content_at("B1").unwrap(), "-2.500000");
}

/// Test that text cells display but fail numeric access
#[test]
fn test_text_cell_is_not_numeric() {
    let mut sheet = Sheet::new();
    sheet.set_content("A1", "hello world").unwrap();

    assert_eq!(sheet.content_at("A1").unwrap(), "hello world");
    assert_eq!(sheet.edit_at("A1").unwrap(), "hello world");

    let error = sheet.value_at("A1").unwrap_err();
    assert_eq!(error.to_string(), "Cannot get numeric value from A1");
}

/// Test a two-input sum and its cascade when an input changes
#[test]
fn test_formula_sum_and_cascade() {
    let mut sheet = Sheet::new();
    sheet.set_content("A2", "5").unwrap();
    sheet.set_content("A3", "6").unwrap();
    sheet.set_content("A1", "=A2+A3").unwrap();

    assert_eq!(sheet.value_at("A1").unwrap(), 11.0);
    assert_eq!(sheet.content_at("A1").unwrap(), "11.000000");
    assert_eq!(sheet.edit_at("A1").unwrap(), "=A2+A3");

    sheet.set_content("A3", "7").unwrap();
    assert_eq!(sheet.value_at("A1").unwrap(), 12.0);
}

/// Test that a chain of formulas recalculates transitively
#[test]
fn test_cascade_is_transitive() {
    let mut sheet = Sheet::new();
    sheet.set_content("A3", "2").unwrap();
    sheet.set_content("A2", "=A3*10").unwrap();
    sheet.set_content("A1", "=A2+1").unwrap();
    assert_eq!(sheet.value_at("A1").unwrap(), 21.0);

    sheet.set_content("A3", "3").unwrap();
    assert_eq!(sheet.value_at("A2").unwrap(), 30.0);
    assert_eq!(sheet.value_at("A1").unwrap(), 31.0);
}

/// Test that a text input turns dependents into error cells without
/// aborting the edit
#[test]
fn test_text_upstream_becomes_evaluation_error() {
    let mut sheet = Sheet::new();
    sheet.set_content("A2", "5").unwrap();
    sheet.set_content("A1", "=A2+1").unwrap();
    assert_eq!(sheet.value_at("A1").unwrap(), 6.0);

    sheet.set_content("A2", "oops").unwrap();
    assert!(sheet.value_at("A1").is_err());
    assert_eq!(
        sheet.content_at("A1").unwrap(),
        "A1: Cannot get numeric value from A2"
    );

    // Recovery: a numeric input clears the cached error
    sheet.set_content("A2", "9").unwrap();
    assert_eq!(sheet.value_at("A1").unwrap(), 10.0);
}

/// Test that every member of a three-cell cycle is marked with the
/// cyclical-dependency error
#[test]
fn test_three_cell_cycle_is_contained() {
    let mut sheet = Sheet::new();
    sheet.set_content("A1", "=A2").unwrap();
    sheet.set_content("A2", "=A3").unwrap();
    sheet.set_content("A3", "=A1").unwrap();

    for addr in ["A1", "A2", "A3"] {
        assert_eq!(
            sheet.content_at(addr).unwrap(),
            format!("{addr}: Cyclical equations detected."),
            "cell {addr}"
        );
        assert!(sheet.value_at(addr).is_err(), "cell {addr}");
    }
}

/// Test that a direct self-reference is contained the same way
#[test]
fn test_self_reference_cycle() {
    let mut sheet = Sheet::new();
    sheet.set_content("B2", "=B2").unwrap();
    assert_eq!(
        sheet.content_at("B2").unwrap(),
        "B2: Cyclical equations detected."
    );
}

/// Test that breaking a cycle restores normal evaluation
#[test]
fn test_broken_cycle_recovers() {
    let mut sheet = Sheet::new();
    sheet.set_content("A1", "=A2").unwrap();
    sheet.set_content("A2", "=A1").unwrap();
    assert!(sheet.value_at("A1").is_err());

    sheet.set_content("A2", "5").unwrap();
    assert_eq!(sheet.value_at("A2").unwrap(), 5.0);
    assert_eq!(sheet.value_at("A1").unwrap(), 5.0);
    assert_eq!(sheet.content_at("A1").unwrap(), "5.000000");
}

/// Test that a malformed formula caches a parse error on its own cell
#[test]
fn test_parse_error_is_cached_on_the_cell() {
    let mut sheet = Sheet::new();
    sheet.set_content("A1", "=A2+").unwrap();
    assert!(sheet.value_at("A1").is_err());
    assert!(sheet.content_at("A1").unwrap().starts_with("A1: Parse error:"));
    assert_eq!(sheet.edit_at("A1").unwrap(), "=A2+");
}

/// Test clearing behavior with and without dependents
#[test]
fn test_clearing_prunes_or_retains() {
    let mut sheet = Sheet::new();
    sheet.set_content("A2", "5").unwrap();
    sheet.set_content("A1", "=A2").unwrap();

    // A2 has a dependent: clearing retains it as an empty zero-valued cell
    sheet.set_content("A2", "").unwrap();
    assert_eq!(sheet.value_at("A2").unwrap(), 0.0);
    assert_eq!(sheet.content_at("A2").unwrap(), "");
    assert_eq!(sheet.value_at("A1").unwrap(), 0.0);

    // Clearing the dependent prunes both, shrinking the bounds
    sheet.set_content("A1", "").unwrap();
    assert_eq!(sheet.bounds().to_string(), "A1");
    assert_eq!(sheet.content_at("A1").unwrap(), "");
    assert_eq!(sheet.content_at("A2").unwrap(), "");
}

/// Test that the update callback fires for every cell a cascade touches
#[test]
fn test_update_callback_observes_cascade() {
    let mut sheet = Sheet::new();
    sheet.set_content("A2", "5").unwrap();
    sheet.set_content("A1", "=A2*2").unwrap();

    let updates: Rc<RefCell<Vec<(String, String)>>> = Rc::default();
    let observed = Rc::clone(&updates);
    sheet.set_update_callback(move |address, cell| {
        observed
            .borrow_mut()
            .push((address.to_string(), cell.display_content()));
    });

    sheet.set_content("A2", "7").unwrap();

    // Dependents finish before the edited cell reports
    assert_eq!(
        *updates.borrow(),
        [
            ("A1".to_string(), "14.000000".to_string()),
            ("A2".to_string(), "7.000000".to_string()),
        ]
    );

    sheet.clear_update_callback();
    sheet.set_content("A2", "8").unwrap();
    assert_eq!(updates.borrow().len(), 2);
}

/// Test that lowercase addresses normalize everywhere
#[test]
fn test_lowercase_addresses_normalize() {
    let mut sheet = Sheet::new();
    sheet.set_content("b2", "3").unwrap();
    sheet.set_content("a1", "=B2+b2").unwrap();
    assert_eq!(sheet.value_at("B2").unwrap(), 3.0);
    assert_eq!(sheet.value_at("A1").unwrap(), 6.0);
}
