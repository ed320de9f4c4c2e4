//! iCalendar PERIOD and property value types (RFC 5545 §3.3).

use std::fmt;

use super::{Duration, RRule, Temporal, UtcOffset};

/// PERIOD value (RFC 5545 §3.3.9).
///
/// A precise period of time, defined by either:
/// - An explicit start and end
/// - A start and a DURATION
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Period {
    Explicit { start: Temporal, end: Temporal },
    Duration { start: Temporal, duration: Duration },
}

impl Period {
    #[must_use]
    pub const fn explicit(start: Temporal, end: Temporal) -> Self {
        Self::Explicit { start, end }
    }

    #[must_use]
    pub const fn from_duration(start: Temporal, duration: Duration) -> Self {
        Self::Duration { start, duration }
    }

    /// Returns the start of the period.
    #[must_use]
    pub const fn start(&self) -> &Temporal {
        match self {
            Self::Explicit { start, .. } | Self::Duration { start, .. } => start,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit { start, end } => write!(f, "{start}/{end}"),
            Self::Duration { start, duration } => write!(f, "{start}/{duration}"),
        }
    }
}

/// Value types (RFC 5545 §3.3).
///
/// The parsed value of a property. Values the parser does not interpret are
/// kept verbatim in [`Value::Unknown`] so they round-trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// BINARY value (decoded from base64).
    Binary(Vec<u8>),
    Boolean(bool),
    /// CAL-ADDRESS value (typically a mailto: URI).
    CalAddress(String),
    Duration(Duration),
    Float(f64),
    Integer(i32),
    Period(Period),
    /// Comma-separated PERIOD values (RDATE;VALUE=PERIOD, FREEBUSY).
    PeriodList(Vec<Period>),
    Recur(Box<RRule>),
    /// DATE or DATE-TIME value.
    Temporal(Temporal),
    /// Comma-separated DATE or DATE-TIME values (EXDATE, RDATE).
    TemporalList(Vec<Temporal>),
    /// TEXT value (unescaped).
    Text(String),
    /// Comma-separated TEXT values (CATEGORIES, RESOURCES).
    TextList(Vec<String>),
    Uri(String),
    UtcOffset(UtcOffset),
    /// Unparsed value, stored in its escaped wire form.
    Unknown(String),
}

impl Value {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Uri(s) | Self::CalAddress(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_temporal(&self) -> Option<&Temporal> {
        match self {
            Self::Temporal(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the values of a date list. A single temporal is returned as a
    /// one-element slice.
    #[must_use]
    pub fn as_temporal_list(&self) -> Option<&[Temporal]> {
        match self {
            Self::TemporalList(list) => Some(list),
            Self::Temporal(t) => Some(std::slice::from_ref(t)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_duration(&self) -> Option<&Duration> {
        match self {
            Self::Duration(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_recur(&self) -> Option<&RRule> {
        match self {
            Self::Recur(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            Self::TextList(list) => Some(list),
            Self::Text(s) => Some(std::slice::from_ref(s)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_period_list(&self) -> Option<&[Period]> {
        match self {
            Self::PeriodList(list) => Some(list),
            Self::Period(p) => Some(std::slice::from_ref(p)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_utc_offset(&self) -> Option<UtcOffset> {
        match self {
            Self::UtcOffset(o) => Some(*o),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}
