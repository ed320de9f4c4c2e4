//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Handles line unfolding and tokenization of content lines.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter};

/// Splits input into logical content lines, merging folded continuations.
///
/// Accepts CRLF and bare LF. A physical line starting with SP or HTAB
/// continues the previous line: the whitespace character is removed and
/// nothing is inserted (RFC 5545 §3.1). Blank physical lines are dropped.
///
/// Each logical line is returned with the 1-based number of the physical
/// line it starts on.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw_line) in input.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if line.is_empty() {
            continue;
        }

        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(continuation);
                continue;
            }
            lines.push((i + 1, continuation.to_string()));
        } else {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// Unfolds text into its logical content lines.
#[must_use]
pub fn unfold(input: &str) -> Vec<String> {
    split_lines(input).into_iter().map(|(_, line)| line).collect()
}

/// Parses a single unfolded content line.
///
/// Format: `name *(";" param) ":" value`
///
/// ## Errors
/// Returns an error if the line does not match the content-line grammar.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let bytes = line.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() && !matches!(bytes[pos], b';' | b':') {
        if !is_name_byte(bytes[pos]) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidPropertyName,
                line_num,
                pos + 1,
            ));
        }
        pos += 1;
    }

    if pos == bytes.len() {
        return Err(ParseError::new(
            ParseErrorKind::MissingColon,
            line_num,
            line.len(),
        ));
    }
    if pos == 0 {
        return Err(ParseError::new(
            ParseErrorKind::MissingPropertyName,
            line_num,
            1,
        ));
    }

    let name = line[..pos].to_ascii_uppercase();

    let mut params = Vec::new();
    while bytes[pos] == b';' {
        pos += 1;
        params.push(parse_parameter(line, &mut pos, line_num)?);
    }

    Ok(ContentLine {
        name,
        params,
        raw_value: line[pos + 1..].to_string(),
    })
}

const fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

/// Parses `NAME=VALUE[,VALUE]` starting at `pos`.
///
/// On success `pos` points at the `;` or `:` that ends the parameter.
fn parse_parameter(line: &str, pos: &mut usize, line_num: usize) -> ParseResult<Parameter> {
    let bytes = line.as_bytes();
    let start = *pos;

    while *pos < bytes.len() && bytes[*pos] != b'=' {
        if !is_name_byte(bytes[*pos]) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidParameter,
                line_num,
                *pos + 1,
            ));
        }
        *pos += 1;
    }

    if *pos == bytes.len() || *pos == start {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            start + 1,
        )
        .with_context("NAME=VALUE expected"));
    }

    let param_name = line[start..*pos].to_ascii_uppercase();
    *pos += 1;

    let mut values = Vec::new();
    loop {
        values.push(parse_param_value(line, pos, line_num)?);

        match bytes.get(*pos) {
            Some(b',') => *pos += 1,
            Some(b';' | b':') => return Ok(Parameter::with_values(param_name, values)),
            Some(&c) => {
                return Err(
                    ParseError::new(ParseErrorKind::InvalidParameter, line_num, *pos + 1)
                        .with_context(format!("unexpected character '{}'", char::from(c))),
                );
            }
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingColon,
                    line_num,
                    line.len(),
                ));
            }
        }
    }
}

/// Parses a parameter value (possibly quoted) starting at `pos`.
fn parse_param_value(line: &str, pos: &mut usize, line_num: usize) -> ParseResult<String> {
    let bytes = line.as_bytes();
    let start = *pos;

    if bytes.get(start) == Some(&b'"') {
        let Some(len) = line[start + 1..].find('"') else {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedQuote,
                line_num,
                start + 1,
            ));
        };
        let end = start + 1 + len;
        *pos = end + 1;
        return Ok(decode_caret(&line[start + 1..end]));
    }

    while *pos < bytes.len() && !matches!(bytes[*pos], b',' | b';' | b':') {
        *pos += 1;
    }
    Ok(line[start..*pos].to_string())
}

/// Decodes RFC 6868 caret escapes. Unknown sequences are kept as-is.
fn decode_caret(s: &str) -> String {
    let mut value = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '^' {
            value.push(c);
            continue;
        }
        match chars.peek() {
            Some('^') => {
                value.push('^');
                chars.next();
            }
            Some('n') => {
                value.push('\n');
                chars.next();
            }
            Some('\'') => {
                value.push('"');
                chars.next();
            }
            _ => value.push('^'),
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfold_simple() {
        let input = "DESCRIPTION:This is a long description\r\n that continues here";
        assert_eq!(
            unfold(input),
            vec!["DESCRIPTION:This is a long descriptionthat continues here"]
        );
    }

    #[test]
    fn unfold_multiple_and_tab() {
        let input = "DESCRIPTION:First\r\n Second\r\n\tThird\r\nSUMMARY:x\r\n";
        assert_eq!(unfold(input), vec!["DESCRIPTION:FirstSecondThird", "SUMMARY:x"]);
    }

    #[test]
    fn unfold_bare_lf_and_blank_lines() {
        let input = "DESCRIPTION:First\n Second\n\n\r\nSUMMARY:y";
        assert_eq!(unfold(input), vec!["DESCRIPTION:FirstSecond", "SUMMARY:y"]);
    }

    #[test]
    fn split_lines_reports_start_line() {
        let input = "BEGIN:VEVENT\r\nSUMMARY:a\r\n b\r\nEND:VEVENT\r\n";
        let lines = split_lines(input);
        assert_eq!(lines[1], (2, "SUMMARY:ab".to_string()));
        assert_eq!(lines[2].0, 4);
    }

    #[test]
    fn parse_simple_line() {
        let result = parse_content_line("SUMMARY:Team Meeting", 1).unwrap();
        assert_eq!(result.name, "SUMMARY");
        assert!(result.params.is_empty());
        assert_eq!(result.raw_value, "Team Meeting");
    }

    #[test]
    fn parse_line_with_params() {
        let result = parse_content_line("DTSTART;TZID=America/New_York:20260123T120000", 1).unwrap();
        assert_eq!(result.name, "DTSTART");
        assert_eq!(result.params.len(), 1);
        assert_eq!(result.params[0].name, "TZID");
        assert_eq!(result.params[0].value(), Some("America/New_York"));
        assert_eq!(result.raw_value, "20260123T120000");
    }

    #[test]
    fn parse_line_keeps_colons_in_value() {
        let result =
            parse_content_line("ATTENDEE;ROLE=CHAIR;CN=Jane:mailto:jane@example.com", 1).unwrap();
        assert_eq!(result.params.len(), 2);
        assert_eq!(result.raw_value, "mailto:jane@example.com");
    }

    #[test]
    fn parse_line_with_quoted_param() {
        let line = "ATTENDEE;CN=\"Doe, Jane: Esq.\":mailto:jane@example.com";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(result.params[0].value(), Some("Doe, Jane: Esq."));
        assert_eq!(result.raw_value, "mailto:jane@example.com");
    }

    #[test]
    fn parse_line_with_multiple_param_values() {
        let line = "ATTENDEE;ROLE=REQ-PARTICIPANT,OPT-PARTICIPANT:mailto:test@example.com";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(
            result.params[0].values,
            vec!["REQ-PARTICIPANT", "OPT-PARTICIPANT"]
        );
    }

    #[test]
    fn parse_line_with_caret_encoding() {
        let line = "ATTENDEE;CN=\"Test^nName ^^ ^'x^'\":mailto:test@example.com";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(result.params[0].value(), Some("Test\nName ^ \"x\""));
    }

    #[test]
    fn parse_line_errors() {
        let unclosed = parse_content_line("ATTENDEE;CN=\"Unclosed:mailto:test@example.com", 1);
        assert_eq!(unclosed.unwrap_err().kind, ParseErrorKind::UnclosedQuote);

        let missing = parse_content_line("INVALID", 4).unwrap_err();
        assert_eq!(missing.kind, ParseErrorKind::MissingColon);
        assert_eq!(missing.line, 4);

        let bad_name = parse_content_line("SUM MARY:x", 1).unwrap_err();
        assert_eq!(bad_name.kind, ParseErrorKind::InvalidPropertyName);

        let no_name = parse_content_line(":value", 1).unwrap_err();
        assert_eq!(no_name.kind, ParseErrorKind::MissingPropertyName);
    }
}
