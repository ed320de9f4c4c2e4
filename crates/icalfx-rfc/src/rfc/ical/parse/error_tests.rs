//! Tests for iCalendar parse errors.

use super::*;

#[test]
fn test_parse_error_new() {
    let error = ParseError::new(ParseErrorKind::UnexpectedEof, 10, 5);
    assert_eq!(error.kind, ParseErrorKind::UnexpectedEof);
    assert_eq!(error.line, 10);
    assert_eq!(error.column, 5);
    assert!(error.context.is_none());
}

#[test]
fn test_parse_error_with_context_and_line() {
    let error = ParseError::new(ParseErrorKind::InvalidDate, 1, 2)
        .with_context("Expected YYYYMMDD format")
        .at_line(3);

    assert_eq!(error.kind, ParseErrorKind::InvalidDate);
    assert_eq!(error.line, 3);
    assert_eq!(error.column, 2);
    assert_eq!(error.context.as_deref(), Some("Expected YYYYMMDD format"));
}

#[test]
fn test_parse_error_display_with_context() {
    let error = ParseError::new(ParseErrorKind::InvalidParameter, 5, 15)
        .with_context("NAME=VALUE expected");
    let display = format!("{error}");
    assert!(display.contains("invalid parameter format"));
    assert!(display.contains("line 5"));
    assert!(display.contains("column 15"));
    assert!(display.contains("NAME=VALUE expected"));
}

#[test]
fn test_rule_error_kinds_display() {
    let kinds = [
        (ParseErrorKind::InvalidRRule, "invalid recurrence rule"),
        (ParseErrorKind::InvalidFrequency, "invalid frequency"),
        (ParseErrorKind::InvalidWeekday, "invalid weekday"),
        (
            ParseErrorKind::UntilCountConflict,
            "UNTIL and COUNT are mutually exclusive",
        ),
        (
            ParseErrorKind::DuplicateRulePart,
            "duplicate recurrence rule part",
        ),
        (ParseErrorKind::MismatchedComponent, "mismatched BEGIN/END"),
    ];

    for (kind, expected) in kinds {
        assert_eq!(format!("{kind}"), expected, "Mismatch for {kind:?}");
    }
}

#[test]
fn test_parse_error_converts_into_rfc_error() {
    let error = ParseError::new(ParseErrorKind::InvalidFloat, 2, 3);
    let rfc: crate::error::RfcError = error.into();
    assert!(rfc.to_string().contains("invalid float value"));
}
