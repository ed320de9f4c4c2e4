//! iCalendar serializer (RFC 5545).
//!
//! Serializes components to content text. Properties are written in
//! sort-order, parameters in the order they were parsed or added.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use icalfx_core::config::{LineEnding, OutputConfig};

use super::escape::escape_text;
use super::fold::fold_line;
use crate::rfc::ical::core::{Component, Property, Value};

/// Output options for serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentOptions {
    pub line_ending: LineEnding,
}

impl ContentOptions {
    /// Options using bare LF line endings.
    #[must_use]
    pub const fn lf() -> Self {
        Self {
            line_ending: LineEnding::Lf,
        }
    }
}

impl From<&OutputConfig> for ContentOptions {
    fn from(config: &OutputConfig) -> Self {
        Self {
            line_ending: config.line_ending,
        }
    }
}

/// Serializes a component and its children.
#[must_use]
pub fn serialize_component(component: &Component, options: &ContentOptions) -> String {
    let mut result = String::new();
    write_component(component, options, &mut result);
    result
}

fn write_component(component: &Component, options: &ContentOptions, out: &mut String) {
    out.push_str(&fold_line(
        &format!("BEGIN:{}", component.name()),
        options.line_ending,
    ));

    for prop in component.ordered_properties() {
        out.push_str(&serialize_property(prop, options));
    }

    for child in &component.children {
        write_component(child, options, out);
    }

    out.push_str(&fold_line(
        &format!("END:{}", component.name()),
        options.line_ending,
    ));
}

/// Serializes a property to a folded, terminated content line.
#[must_use]
pub fn serialize_property(prop: &Property, options: &ContentOptions) -> String {
    let mut line = prop.name.clone();
    for param in &prop.params {
        line.push(';');
        line.push_str(&param.to_string());
    }
    line.push(':');
    line.push_str(&serialize_value(&prop.value));

    fold_line(&line, options.line_ending)
}

/// Encodes a value in its content-line form.
#[must_use]
pub fn serialize_value(value: &Value) -> String {
    match value {
        Value::Binary(bytes) => STANDARD.encode(bytes),
        Value::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Value::CalAddress(s) | Value::Uri(s) | Value::Unknown(s) => s.clone(),
        Value::Duration(d) => d.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Period(p) => p.to_string(),
        Value::PeriodList(list) => join(list),
        Value::Recur(rrule) => rrule.to_string(),
        Value::Temporal(t) => t.to_string(),
        Value::TemporalList(list) => join(list),
        Value::Text(s) => escape_text(s),
        Value::TextList(list) => list
            .iter()
            .map(|s| escape_text(s))
            .collect::<Vec<_>>()
            .join(","),
        Value::UtcOffset(offset) => offset.to_string(),
    }
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{Duration, Parameter, Temporal};

    #[test]
    fn serialize_simple_property() {
        let prop = Property::text("SUMMARY", "Test Event");
        assert_eq!(
            serialize_property(&prop, &ContentOptions::default()),
            "SUMMARY:Test Event\r\n"
        );
    }

    #[test]
    fn serialize_property_with_params_in_order() {
        let prop = Property::cal_address("ATTENDEE", "mailto:jane@example.com")
            .with_param(Parameter::new("ROLE", "CHAIR"))
            .with_param(Parameter::cn("Jane Doe"));
        assert_eq!(
            serialize_property(&prop, &ContentOptions::lf()),
            "ATTENDEE;ROLE=CHAIR;CN=Jane Doe:mailto:jane@example.com\n"
        );
    }

    #[test]
    fn serialize_text_escapes() {
        let prop = Property::text("DESCRIPTION", "Line 1\nLine 2, with comma");
        assert_eq!(
            serialize_property(&prop, &ContentOptions::default()),
            "DESCRIPTION:Line 1\\nLine 2\\, with comma\r\n"
        );
    }

    #[test]
    fn serialize_temporal_values() {
        let prop = Property::temporal(
            "DTSTART",
            Temporal::zoned(2026, 1, 23, 12, 0, 0, "America/New_York").unwrap(),
        );
        assert_eq!(
            serialize_property(&prop, &ContentOptions::lf()),
            "DTSTART;TZID=America/New_York:20260123T120000\n"
        );

        let exdates = Property::temporal_list(
            "EXDATE",
            vec![
                Temporal::date(2026, 1, 1).unwrap(),
                Temporal::date(2026, 1, 2).unwrap(),
            ],
        );
        assert_eq!(
            serialize_property(&exdates, &ContentOptions::lf()),
            "EXDATE;VALUE=DATE:20260101,20260102\n"
        );
    }

    #[test]
    fn serialize_scalar_values() {
        assert_eq!(serialize_value(&Value::Boolean(true)), "TRUE");
        assert_eq!(serialize_value(&Value::Binary(b"hello".to_vec())), "aGVsbG8=");
        assert_eq!(serialize_value(&Value::Duration(Duration::hours(1))), "PT1H");
        assert_eq!(
            serialize_value(&Value::TextList(vec!["a,b".into(), "c".into()])),
            "a\\,b,c"
        );
    }

    #[test]
    fn serialize_component_lf() {
        let mut event = Component::event();
        event.add_property(Property::temporal(
            "DTSTART",
            Temporal::local(2016, 3, 6, 8, 0, 0).unwrap(),
        ));
        event.add_property(Property::text("COMMENT", "This is a test comment"));

        // Every content line is terminated (RFC 5545 §3.1), END included, so
        // the output is the bare literal plus one final line break.
        let literal =
            "BEGIN:VEVENT\nDTSTART:20160306T080000\nCOMMENT:This is a test comment\nEND:VEVENT";
        let output = serialize_component(&event, &ContentOptions::lf());
        assert_eq!(output.strip_suffix('\n'), Some(literal));
        assert!(!output.ends_with("\n\n"));
        assert_eq!(
            serialize_component(&event, &ContentOptions::default()),
            format!("{}\r\n", literal.replace('\n', "\r\n"))
        );
    }

    #[test]
    fn serialize_nested_components() {
        let mut calendar = Component::calendar();
        calendar.add_property(Property::text("VERSION", "2.0"));
        let mut event = Component::event();
        event.add_property(Property::text("UID", "nested"));
        calendar.add_child(event);

        assert_eq!(
            serialize_component(&calendar, &ContentOptions::default()),
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:nested\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n"
        );
    }
}
