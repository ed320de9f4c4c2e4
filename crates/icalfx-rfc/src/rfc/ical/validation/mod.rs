//! ## Summary
//! Non-fatal semantic validation of components and recurrence rules.
//!
//! Structural problems abort parsing; everything here is collected into a
//! list of human-readable messages instead. Messages from sub-components are
//! prefixed with the sub-component's name.

mod rrule;

pub use rrule::validate_rrule;

use crate::rfc::ical::core::{Component, ComponentKind, Property, Temporal, names};

/// Properties whose presence is required per component kind
/// (RFC 5545 §3.6).
const fn required_properties(kind: ComponentKind) -> &'static [&'static str] {
    match kind {
        ComponentKind::Calendar => &[names::PRODID, names::VERSION],
        ComponentKind::Event
        | ComponentKind::Todo
        | ComponentKind::Journal
        | ComponentKind::FreeBusy => &[names::UID, names::DTSTAMP],
        ComponentKind::Alarm => &[names::ACTION, names::TRIGGER],
        ComponentKind::Timezone => &[names::TZID],
        ComponentKind::Standard | ComponentKind::Daylight => {
            &[names::DTSTART, names::TZOFFSETFROM, names::TZOFFSETTO]
        }
        ComponentKind::Unknown => &[],
    }
}

/// Mutually exclusive property pairs.
const EXCLUSIVE_PAIRS: &[(&str, &str)] = &[
    (names::DTEND, names::DURATION),
    (names::DUE, names::DURATION),
];

/// ## Summary
/// Collects every validation issue of `component` and its sub-components.
#[must_use]
pub fn validate_component(component: &Component) -> Vec<String> {
    let mut errors = Vec::new();

    check_required(component, &mut errors);
    check_cardinality(component, &mut errors);
    check_exclusive(component, &mut errors);

    if let Some(start) = component.dtstart() {
        check_value_types(component, start, &mut errors);
        check_ordering(component, start, &mut errors);
    }

    if let Some(rrule) = component.rrule() {
        errors.extend(
            validate_rrule(rrule, component.dtstart())
                .into_iter()
                .map(|e| format!("RRULE: {e}")),
        );
    }

    for child in &component.children {
        errors.extend(
            validate_component(child)
                .into_iter()
                .map(|e| format!("{}: {e}", child.name())),
        );
    }

    errors
}

fn check_required(component: &Component, errors: &mut Vec<String>) {
    for name in required_properties(component.kind()) {
        if component.get_property(name).is_none() {
            errors.push(format!("{} is missing required {name}", component.name()));
        }
    }
}

fn check_cardinality(component: &Component, errors: &mut Vec<String>) {
    for name in component.kind().once_only_properties() {
        let count = component.get_properties(name).len();
        if count > 1 {
            errors.push(format!(
                "{name} may appear at most once in {}, found {count}",
                component.name()
            ));
        }
    }
}

fn check_exclusive(component: &Component, errors: &mut Vec<String>) {
    for (a, b) in EXCLUSIVE_PAIRS {
        if component.get_property(a).is_some() && component.get_property(b).is_some() {
            errors.push(format!("{a} and {b} are mutually exclusive"));
        }
    }
}

/// Every date-valued property must share the granularity of DTSTART.
fn check_value_types(component: &Component, start: &Temporal, errors: &mut Vec<String>) {
    let expected = start.date_time_type();

    for name in [names::DTEND, names::DUE, names::RECURRENCE_ID] {
        if let Some(value) = component.get_property(name).and_then(Property::as_temporal)
            && value.date_time_type() != expected
        {
            errors.push(format!(
                "{name} has type {}, but DTSTART has type {expected}",
                value.date_time_type()
            ));
        }
    }

    for (name, values) in [
        (names::EXDATE, component.exdates()),
        (names::RDATE, component.rdates()),
    ] {
        for value in values {
            if value.date_time_type() != expected {
                errors.push(format!(
                    "{name} value {value} has type {}, but DTSTART has type {expected}",
                    value.date_time_type()
                ));
            }
        }
    }
}

/// End and due values must lie strictly after the start.
fn check_ordering(component: &Component, start: &Temporal, errors: &mut Vec<String>) {
    for (name, value) in [
        (names::DTEND, component.dtend()),
        (names::DUE, component.due()),
    ] {
        if let Some(value) = value
            && value.date_time_type() == start.date_time_type()
            && value <= start
        {
            errors.push(format!("{name} must be after DTSTART"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{Duration, RRule};

    fn event() -> Component {
        let mut event = Component::event();
        event.add_property(Property::text(names::UID, "validation@example.com"));
        event.add_property(Property::temporal(
            names::DTSTAMP,
            Temporal::utc(2026, 1, 1, 0, 0, 0).unwrap(),
        ));
        event.add_property(Property::temporal(
            names::DTSTART,
            Temporal::local(2026, 1, 5, 9, 0, 0).unwrap(),
        ));
        event
    }

    #[test]
    fn valid_event_has_no_errors() {
        let mut event = event();
        event.add_property(Property::temporal(
            names::DTEND,
            Temporal::local(2026, 1, 5, 10, 0, 0).unwrap(),
        ));
        event.add_property(Property::recur(names::RRULE, RRule::daily().with_count(3)));
        assert!(event.errors().is_empty(), "{:?}", event.errors());
    }

    #[test]
    fn missing_required_properties() {
        let errors = Component::event().errors();
        assert!(errors.contains(&"VEVENT is missing required UID".to_string()));
        assert!(errors.contains(&"VEVENT is missing required DTSTAMP".to_string()));
    }

    #[test]
    fn exdate_type_mismatch() {
        let mut event = event();
        event.add_property(Property::temporal_list(
            names::EXDATE,
            vec![Temporal::date(2026, 1, 6).unwrap()],
        ));
        let errors = event.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("EXDATE value 20260106 has type DATE"));
    }

    #[test]
    fn dtend_and_duration_are_exclusive() {
        let mut event = event();
        event.add_property(Property::temporal(
            names::DTEND,
            Temporal::local(2026, 1, 5, 10, 0, 0).unwrap(),
        ));
        event.add_property(Property::duration(names::DURATION, Duration::hours(1)));
        assert!(
            event
                .errors()
                .contains(&"DTEND and DURATION are mutually exclusive".to_string())
        );
    }

    #[test]
    fn dtend_before_start() {
        let mut event = event();
        event.add_property(Property::temporal(
            names::DTEND,
            Temporal::local(2026, 1, 5, 9, 0, 0).unwrap(),
        ));
        assert_eq!(event.errors(), vec!["DTEND must be after DTSTART"]);
    }

    #[test]
    fn duplicate_once_only_property() {
        let mut event = event();
        event.add_property(Property::text(names::SUMMARY, "one"));
        event.add_property(Property::text(names::SUMMARY, "two"));
        assert_eq!(
            event.errors(),
            vec!["SUMMARY may appear at most once in VEVENT, found 2"]
        );
    }

    #[test]
    fn child_errors_are_prefixed() {
        let mut event = event();
        event.add_child(Component::alarm());
        let errors = event.errors();
        assert!(errors.contains(&"VALARM: VALARM is missing required ACTION".to_string()));
    }

    #[test]
    fn rule_errors_are_prefixed() {
        let mut event = event();
        event.add_property(Property::recur(names::RRULE, RRule::daily().with_interval(0)));
        assert_eq!(event.errors(), vec!["RRULE: INTERVAL must be positive"]);
    }
}
