//! iCalendar document parser (RFC 5545).
//!
//! Parses complete iCalendar documents into typed structures.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, split_lines};
use super::values::parse_value;
use crate::rfc::ical::core::{Component, ComponentKind, ContentLine, ICalendar, Property};

/// Parses an iCalendar document from a string.
///
/// ## Errors
///
/// Returns an error if the root component is not VCALENDAR or the content
/// is malformed.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    let root = parse_root(input)?;

    if root.kind() != ComponentKind::Calendar {
        tracing::warn!(root = %root.name(), "Root component is not VCALENDAR");
        return Err(
            ParseError::new(ParseErrorKind::MissingBegin, 1, 1).with_context("expected VCALENDAR")
        );
    }

    tracing::debug!("iCalendar document parsed successfully");
    Ok(ICalendar { root })
}

/// Parses a single component of any kind, including its sub-components.
///
/// ## Errors
///
/// Returns an error if BEGIN/END delimiters are missing or mismatched, or a
/// property value does not match its value type.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_component(input: &str) -> ParseResult<Component> {
    parse_root(input)
}

/// Parses a single (possibly folded) property line.
///
/// ## Errors
///
/// Returns an error if the text does not hold exactly one content line or
/// the value does not match the property's value type.
pub fn parse_property(input: &str) -> ParseResult<Property> {
    let mut lines = split_lines(input).into_iter();
    let Some((line_num, line)) = lines.next() else {
        return Err(ParseError::new(ParseErrorKind::UnexpectedEof, 1, 1));
    };
    if let Some((extra, _)) = lines.next() {
        return Err(ParseError::new(ParseErrorKind::InvalidContentLine, extra, 1)
            .with_context("expected a single content line"));
    }

    let content_line = parse_content_line(&line, line_num)?;
    build_property(content_line, &line, line_num)
}

/// Walks the logical lines with an explicit stack of open components.
fn parse_root(input: &str) -> ParseResult<Component> {
    let lines = split_lines(input);
    if lines.is_empty() {
        tracing::warn!("Empty iCalendar input");
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1, 1));
    }
    tracing::trace!(count = lines.len(), "Split lines");

    let mut stack: Vec<Component> = Vec::new();
    let mut root: Option<Component> = None;
    let mut last_line = 1;

    for (line_num, line) in lines {
        last_line = line_num;
        let content_line = match parse_content_line(&line, line_num) {
            Ok(cl) => cl,
            Err(err) => {
                tracing::debug!(line = line_num, error = %err, "Skipping unparseable line");
                continue;
            }
        };

        if root.is_some() {
            return Err(
                ParseError::new(ParseErrorKind::InvalidNesting, line_num, 1)
                    .with_context("content after the root component ended"),
            );
        }

        match content_line.name.as_str() {
            "BEGIN" => {
                let name = content_line.raw_value.trim();
                if name.is_empty() {
                    return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
                        .with_context("BEGIN without a component name"));
                }
                stack.push(Component::custom(name));
            }
            "END" => {
                let Some(component) = stack.pop() else {
                    return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
                        .with_context(format!("unmatched END:{}", content_line.raw_value)));
                };
                let end_name = content_line.raw_value.trim().to_ascii_uppercase();
                if end_name != component.name() {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                            .with_context(format!(
                                "expected END:{}, got END:{end_name}",
                                component.name()
                            )),
                    );
                }
                match stack.last_mut() {
                    Some(parent) => parent.add_child(component),
                    None => root = Some(component),
                }
            }
            _ => {
                let Some(current) = stack.last_mut() else {
                    return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
                        .with_context(format!("{} outside a component", content_line.name)));
                };
                current.push_parsed_property(build_property(content_line, &line, line_num)?);
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::new(ParseErrorKind::MissingEnd, last_line, 1)
            .with_context(format!("missing END:{}", open.name())));
    }

    root.ok_or_else(|| ParseError::new(ParseErrorKind::MissingBegin, 1, 1))
}

/// Resolves the typed value of a content line into a property.
fn build_property(content_line: ContentLine, line: &str, line_num: usize) -> ParseResult<Property> {
    let col = line.len() - content_line.raw_value.len() + 1;
    let value = parse_value(&content_line, line_num, col)?;

    let mut property = Property::from_content_line(content_line);
    property.value = value;
    Ok(property)
}
