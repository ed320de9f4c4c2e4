//! iCalendar property and content line types (RFC 5545 §3.1, §3.8).

use std::str::FromStr;

use super::{Duration, Parameter, Period, RRule, Temporal, UtcOffset, Value};
use crate::rfc::ical::build::{self, ContentOptions};
use crate::rfc::ical::parse::{self, ParseError, ParseResult};

/// A raw content line as produced by the lexer.
///
/// This is the low-level representation before value type resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Raw value string (after unfolding, before unescaping).
    pub raw_value: String,
}

impl ContentLine {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            raw_value: value.into(),
        }
    }

    #[must_use]
    pub fn with_params(
        name: impl Into<String>,
        params: Vec<Parameter>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params,
            raw_value: value.into(),
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == name_upper)
    }

    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    /// Returns the VALUE parameter if present.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.get_param_value("VALUE")
    }

    /// Returns the TZID parameter if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.get_param_value("TZID")
    }
}

/// A fully parsed iCalendar property.
///
/// Equality compares name, parameters and value. The sort-order token only
/// affects serialization.
#[derive(Debug, Clone)]
pub struct Property {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    pub value: Value,
    sort_order: Option<u32>,
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.params == other.params && self.value == other.value
    }
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value,
            sort_order: None,
        }
    }

    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Value::Text(value.into()))
    }

    #[must_use]
    pub fn integer(name: impl Into<String>, value: i32) -> Self {
        Self::new(name, Value::Integer(value))
    }

    /// Creates a date or date-time property. Zoned values carry a `TZID`
    /// parameter and dates carry `VALUE=DATE`.
    #[must_use]
    pub fn temporal(name: impl Into<String>, value: Temporal) -> Self {
        let params = temporal_params(&value);
        Self::new(name, Value::Temporal(value)).with_params(params)
    }

    /// Creates a date-list property such as EXDATE or RDATE. The parameters
    /// are taken from the first value.
    #[must_use]
    pub fn temporal_list(name: impl Into<String>, values: Vec<Temporal>) -> Self {
        let params = values.first().map(temporal_params).unwrap_or_default();
        Self::new(name, Value::TemporalList(values)).with_params(params)
    }

    /// Creates an `RDATE;VALUE=PERIOD` style property.
    #[must_use]
    pub fn period_list(name: impl Into<String>, values: Vec<Period>) -> Self {
        let mut params = values
            .first()
            .map(|p| temporal_params(p.start()))
            .unwrap_or_default();
        params.push(Parameter::value_type("PERIOD"));
        Self::new(name, Value::PeriodList(values)).with_params(params)
    }

    #[must_use]
    pub fn duration(name: impl Into<String>, d: Duration) -> Self {
        Self::new(name, Value::Duration(d))
    }

    #[must_use]
    pub fn recur(name: impl Into<String>, rrule: RRule) -> Self {
        Self::new(name, Value::Recur(Box::new(rrule)))
    }

    #[must_use]
    pub fn text_list(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(name, Value::TextList(values))
    }

    #[must_use]
    pub fn utc_offset(name: impl Into<String>, offset: UtcOffset) -> Self {
        Self::new(name, Value::UtcOffset(offset))
    }

    #[must_use]
    pub fn cal_address(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(name, Value::CalAddress(address.into()))
    }

    #[must_use]
    pub fn uri(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::new(name, Value::Uri(uri.into()))
    }

    /// Creates a property whose value is written verbatim.
    #[must_use]
    pub fn unknown(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::new(name, Value::Unknown(raw.into()))
    }

    /// Creates a property from a content line with an unparsed value.
    #[must_use]
    pub fn from_content_line(cl: ContentLine) -> Self {
        Self {
            name: cl.name,
            params: cl.params,
            value: Value::Unknown(cl.raw_value),
            sort_order: None,
        }
    }

    /// Parses a single (possibly folded) content line.
    ///
    /// ## Errors
    /// Returns an error if the text holds no line or more than one logical
    /// line, or if the value does not match the property's value type.
    pub fn parse(text: &str) -> ParseResult<Self> {
        parse::parse_property(text)
    }

    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.set_param(param);
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<Parameter>) -> Self {
        for param in params {
            self.set_param(param);
        }
        self
    }

    /// Overrides the serialization position of this property.
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: u32) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    #[must_use]
    pub const fn sort_order(&self) -> Option<u32> {
        self.sort_order
    }

    pub(crate) fn assign_sort_order(&mut self, sort_order: u32) {
        if self.sort_order.is_none() {
            self.sort_order = Some(sort_order);
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == name_upper)
    }

    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.get_param(name).is_some()
    }

    pub fn add_param(&mut self, param: Parameter) {
        self.params.push(param);
    }

    /// Sets a parameter, replacing any existing parameter with the same name
    /// at its original position.
    pub fn set_param(&mut self, param: Parameter) {
        if let Some(existing) = self.params.iter_mut().find(|p| p.name == param.name) {
            *existing = param;
        } else {
            self.params.push(param);
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<i32> {
        self.value.as_integer()
    }

    #[must_use]
    pub const fn as_temporal(&self) -> Option<&Temporal> {
        self.value.as_temporal()
    }

    #[must_use]
    pub fn as_temporal_list(&self) -> Option<&[Temporal]> {
        self.value.as_temporal_list()
    }

    #[must_use]
    pub const fn as_duration(&self) -> Option<&Duration> {
        self.value.as_duration()
    }

    #[must_use]
    pub fn as_recur(&self) -> Option<&RRule> {
        self.value.as_recur()
    }

    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        self.value.as_text_list()
    }

    /// Serializes to a folded content line terminated by CRLF.
    #[must_use]
    pub fn to_content(&self) -> String {
        self.to_content_with(&ContentOptions::default())
    }

    #[must_use]
    pub fn to_content_with(&self, options: &ContentOptions) -> String {
        build::serialize_property(self, options)
    }
}

impl FromStr for Property {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn temporal_params(value: &Temporal) -> Vec<Parameter> {
    match value {
        Temporal::Date(_) => vec![Parameter::value_type("DATE")],
        Temporal::Zoned { tzid, .. } => vec![Parameter::tzid(tzid.clone())],
        Temporal::Local(_) | Temporal::Utc(_) => Vec::new(),
    }
}

/// Common property names as constants.
pub mod names {
    // Calendar properties
    pub const CALSCALE: &str = "CALSCALE";
    pub const METHOD: &str = "METHOD";
    pub const PRODID: &str = "PRODID";
    pub const VERSION: &str = "VERSION";

    // Descriptive component properties
    pub const ATTACH: &str = "ATTACH";
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const CLASS: &str = "CLASS";
    pub const COMMENT: &str = "COMMENT";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const GEO: &str = "GEO";
    pub const LOCATION: &str = "LOCATION";
    pub const PERCENT_COMPLETE: &str = "PERCENT-COMPLETE";
    pub const PRIORITY: &str = "PRIORITY";
    pub const RESOURCES: &str = "RESOURCES";
    pub const STATUS: &str = "STATUS";
    pub const SUMMARY: &str = "SUMMARY";

    // Date and time properties
    pub const COMPLETED: &str = "COMPLETED";
    pub const DTEND: &str = "DTEND";
    pub const DUE: &str = "DUE";
    pub const DTSTART: &str = "DTSTART";
    pub const DURATION: &str = "DURATION";
    pub const FREEBUSY: &str = "FREEBUSY";
    pub const TRANSP: &str = "TRANSP";

    // Timezone properties
    pub const TZID: &str = "TZID";
    pub const TZNAME: &str = "TZNAME";
    pub const TZOFFSETFROM: &str = "TZOFFSETFROM";
    pub const TZOFFSETTO: &str = "TZOFFSETTO";
    pub const TZURL: &str = "TZURL";

    // Relationship properties
    pub const ATTENDEE: &str = "ATTENDEE";
    pub const CONTACT: &str = "CONTACT";
    pub const ORGANIZER: &str = "ORGANIZER";
    pub const RECURRENCE_ID: &str = "RECURRENCE-ID";
    pub const RELATED_TO: &str = "RELATED-TO";
    pub const URL: &str = "URL";
    pub const UID: &str = "UID";

    // Recurrence properties
    pub const EXDATE: &str = "EXDATE";
    pub const RDATE: &str = "RDATE";
    pub const RRULE: &str = "RRULE";

    // Alarm properties
    pub const ACTION: &str = "ACTION";
    pub const REPEAT: &str = "REPEAT";
    pub const TRIGGER: &str = "TRIGGER";

    // Change management properties
    pub const CREATED: &str = "CREATED";
    pub const DTSTAMP: &str = "DTSTAMP";
    pub const LAST_MODIFIED: &str = "LAST-MODIFIED";
    pub const SEQUENCE: &str = "SEQUENCE";

    pub const REQUEST_STATUS: &str = "REQUEST-STATUS";
}
