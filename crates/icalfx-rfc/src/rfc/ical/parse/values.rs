//! Value type parsers for iCalendar (RFC 5545 §3.3).
//!
//! Error sources are discarded during parsing (`map_err_ignore`); the
//! position and kind carried by [`ParseError`] are what callers act on.
#![expect(
    clippy::map_err_ignore,
    reason = "Value parsers report position and kind, not the underlying std error"
)]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{
    ByRule, ContentLine, Duration, Frequency, Period, RRule, RulePart, Temporal, Terminator,
    UtcOffset, Value, Weekday, WeekdayNum, names,
};

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit calendar date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<NaiveDate> {
    let err = || ParseError::new(ParseErrorKind::InvalidDate, line, col).with_context(s.to_string());
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }

    let year = s[0..4].parse::<i32>().map_err(|_| err())?;
    let month = s[4..6].parse::<u32>().map_err(|_| err())?;
    let day = s[6..8].parse::<u32>().map_err(|_| err())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(err)
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDDTHHMMSS[Z]. A `Z` suffix yields UTC, otherwise `tzid`
/// selects between a zoned and a floating value.
///
/// ## Errors
/// Returns an error if the string is not a valid date-time.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<Temporal> {
    let err =
        || ParseError::new(ParseErrorKind::InvalidDateTime, line, col).with_context(s.to_string());

    let (body, is_utc) = match s.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (s, false),
    };
    let (date_str, time_str) = body.split_once('T').ok_or_else(err)?;
    if time_str.len() != 6 || !time_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }

    let date = parse_date(date_str, line, col).map_err(|_| err())?;
    let hour = time_str[0..2].parse::<u32>().map_err(|_| err())?;
    let minute = time_str[2..4].parse::<u32>().map_err(|_| err())?;
    let second = time_str[4..6].parse::<u32>().map_err(|_| err())?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(err)?;
    let local = NaiveDateTime::new(date, time);

    Ok(match (is_utc, tzid) {
        (true, _) => Temporal::Utc(Utc.from_utc_datetime(&local)),
        (false, Some(tzid)) => Temporal::Zoned {
            local,
            tzid: tzid.to_string(),
        },
        (false, None) => Temporal::Local(local),
    })
}

/// Parses a DATE or DATE-TIME. Values without a `T` are dates unless
/// `force_date` already says so.
///
/// ## Errors
/// Returns an error if the value is neither form.
pub fn parse_temporal(
    s: &str,
    tzid: Option<&str>,
    force_date: bool,
    line: usize,
    col: usize,
) -> ParseResult<Temporal> {
    if force_date || !s.contains('T') {
        parse_date(s, line, col).map(Temporal::Date)
    } else {
        parse_datetime(s, tzid, line, col)
    }
}

/// Parses a UTC-OFFSET value (RFC 5545 §3.3.14).
///
/// Format: (+|-)HHMM[SS]
///
/// ## Errors
/// Returns an error if the string is not a valid offset.
pub fn parse_utc_offset(s: &str, line: usize, col: usize) -> ParseResult<UtcOffset> {
    let err = || ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col);

    let (sign, digits) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(err()),
    };
    if !matches!(digits.len(), 4 | 6) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }

    let hours = digits[0..2].parse::<i32>().map_err(|_| err())?;
    let minutes = digits[2..4].parse::<i32>().map_err(|_| err())?;
    let seconds = if digits.len() == 6 {
        digits[4..6].parse::<i32>().map_err(|_| err())?
    } else {
        0
    };
    if minutes > 59 || seconds > 59 {
        return Err(err());
    }

    Ok(UtcOffset::from_seconds(
        sign * (hours * 3600 + minutes * 60 + seconds),
    ))
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: `[+|-]P(nW | [nD][T[nH][nM][nS]])`
///
/// ## Errors
/// Returns an error if the string is not a valid duration.
pub fn parse_duration(s: &str, line: usize, col: usize) -> ParseResult<Duration> {
    let err =
        || ParseError::new(ParseErrorKind::InvalidDuration, line, col).with_context(s.to_string());

    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let rest = rest.strip_prefix('P').ok_or_else(err)?;

    let mut duration = Duration {
        negative,
        ..Duration::zero()
    };
    let mut in_time = false;
    let mut seen_component = false;
    let mut seen_time_component = false;
    let mut number = String::new();

    for c in rest.chars() {
        match c {
            '0'..='9' => number.push(c),
            'T' if !in_time && number.is_empty() => in_time = true,
            unit => {
                let n = number.parse::<u32>().map_err(|_| err())?;
                number.clear();
                let slot = match (in_time, unit) {
                    (false, 'W') => &mut duration.weeks,
                    (false, 'D') => &mut duration.days,
                    (true, 'H') => &mut duration.hours,
                    (true, 'M') => &mut duration.minutes,
                    (true, 'S') => &mut duration.seconds,
                    _ => return Err(err()),
                };
                *slot = n;
                seen_component = true;
                seen_time_component |= in_time;
            }
        }
    }

    let weeks_mixed = duration.weeks > 0
        && (duration.days > 0 || duration.hours > 0 || duration.minutes > 0 || duration.seconds > 0);
    if !number.is_empty() || !seen_component || (in_time && !seen_time_component) || weeks_mixed {
        return Err(err());
    }

    Ok(duration)
}

/// Parses a PERIOD value (RFC 5545 §3.3.9).
///
/// ## Errors
/// Returns an error if the string is not `start/end` or `start/duration`.
pub fn parse_period(s: &str, tzid: Option<&str>, line: usize, col: usize) -> ParseResult<Period> {
    let err = || ParseError::new(ParseErrorKind::InvalidPeriod, line, col).with_context(s.to_string());

    let (start_str, end_str) = s.split_once('/').ok_or_else(err)?;
    let start = parse_datetime(start_str, tzid, line, col).map_err(|_| err())?;

    if end_str.starts_with(['P', '+', '-']) {
        let duration = parse_duration(end_str, line, col).map_err(|_| err())?;
        Ok(Period::from_duration(start, duration))
    } else {
        let end = parse_datetime(end_str, tzid, line, col).map_err(|_| err())?;
        Ok(Period::explicit(start, end))
    }
}

/// Parses an RRULE value (RFC 5545 §3.3.10).
///
/// Parts may appear in any order; the order is remembered for serialization.
///
/// ## Errors
/// Returns an error if FREQ is missing, a part is malformed or repeated, or
/// both COUNT and UNTIL are present.
pub fn parse_rrule(s: &str, line: usize, col: usize) -> ParseResult<RRule> {
    let mut freq = None;
    let mut parts = Vec::new();

    for part in s.split(';').filter(|p| !p.is_empty()) {
        let (key, value) = part.split_once('=').ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidRRule, line, col).with_context(part.to_string())
        })?;
        let key = key.to_ascii_uppercase();
        if key == "FREQ" {
            if freq.is_some() {
                return Err(duplicate_part(&key, line, col));
            }
            freq = Some(
                Frequency::parse(value)
                    .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidFrequency, line, col))?,
            );
        }
        parts.push((key, value));
    }

    let freq = freq.ok_or_else(|| {
        ParseError::new(ParseErrorKind::InvalidRRule, line, col).with_context("FREQ is required")
    })?;
    let mut rrule = RRule::new(freq);

    for (key, value) in parts {
        parse_rrule_part(&mut rrule, &key, value, line, col)?;
    }

    Ok(rrule)
}

fn duplicate_part(key: &str, line: usize, col: usize) -> ParseError {
    ParseError::new(ParseErrorKind::DuplicateRulePart, line, col).with_context(key.to_string())
}

/// Parses a single RRULE key-value pair into `rrule`.
fn parse_rrule_part(
    rrule: &mut RRule,
    key: &str,
    value: &str,
    line: usize,
    col: usize,
) -> ParseResult<()> {
    let invalid = || {
        ParseError::new(ParseErrorKind::InvalidRRule, line, col).with_context(format!("{key}={value}"))
    };

    let part = match key {
        "FREQ" => RulePart::Freq,
        "INTERVAL" => {
            if rrule.interval.is_some() {
                return Err(duplicate_part(key, line, col));
            }
            rrule.interval = Some(value.parse().map_err(|_| invalid())?);
            RulePart::Interval
        }
        "COUNT" | "UNTIL" => {
            match (&rrule.terminator, key) {
                (Terminator::Unbounded, _) => {}
                (Terminator::Count(_), "COUNT") | (Terminator::Until(_), "UNTIL") => {
                    return Err(duplicate_part(key, line, col));
                }
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::UntilCountConflict,
                        line,
                        col,
                    ));
                }
            }
            rrule.terminator = if key == "COUNT" {
                Terminator::Count(value.parse().map_err(|_| invalid())?)
            } else {
                Terminator::Until(parse_temporal(value, None, false, line, col)?)
            };
            RulePart::Terminator
        }
        _ => {
            let by_rule = parse_by_rule(key, value, line, col)?;
            let kind = by_rule.kind();
            if rrule.has(kind) {
                return Err(duplicate_part(key, line, col));
            }
            rrule.set_by_rule(by_rule);
            RulePart::By(kind)
        }
    };

    rrule.record_part(part);
    Ok(())
}

fn parse_by_rule(key: &str, value: &str, line: usize, col: usize) -> ParseResult<ByRule> {
    Ok(match key {
        "BYSECOND" => ByRule::Second(parse_list(value, line, col)?),
        "BYMINUTE" => ByRule::Minute(parse_list(value, line, col)?),
        "BYHOUR" => ByRule::Hour(parse_list(value, line, col)?),
        "BYDAY" => ByRule::Day(
            value
                .split(',')
                .map(|v| parse_weekday_num(v.trim(), line, col))
                .collect::<ParseResult<_>>()?,
        ),
        "BYMONTHDAY" => ByRule::MonthDay(parse_list(value, line, col)?),
        "BYYEARDAY" => ByRule::YearDay(parse_list(value, line, col)?),
        "BYWEEKNO" => ByRule::WeekNo(parse_list(value, line, col)?),
        "BYMONTH" => ByRule::Month(parse_list(value, line, col)?),
        "BYSETPOS" => ByRule::SetPos(parse_list(value, line, col)?),
        "WKST" => ByRule::WeekStart(
            Weekday::parse(value)
                .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, line, col))?,
        ),
        _ => {
            return Err(ParseError::new(ParseErrorKind::InvalidRRule, line, col)
                .with_context(format!("unknown rule part {key}")));
        }
    })
}

/// Parses a comma-separated list of integers. A leading `+` is accepted.
fn parse_list<T: std::str::FromStr>(s: &str, line: usize, col: usize) -> ParseResult<Vec<T>> {
    s.split(',')
        .map(|v| {
            let v = v.trim();
            v.strip_prefix('+')
                .unwrap_or(v)
                .parse()
                .map_err(|_| {
                    ParseError::new(ParseErrorKind::InvalidRRule, line, col)
                        .with_context(v.to_string())
                })
        })
        .collect()
}

/// Parses a single weekday with optional ordinal (e.g., "MO", "1MO", "-1FR").
fn parse_weekday_num(s: &str, line: usize, col: usize) -> ParseResult<WeekdayNum> {
    let err = || ParseError::new(ParseErrorKind::InvalidWeekday, line, col).with_context(s.to_string());
    if s.len() < 2 || !s.is_char_boundary(s.len() - 2) {
        return Err(err());
    }

    let (ordinal_str, weekday_str) = s.split_at(s.len() - 2);
    let weekday = Weekday::parse(weekday_str).ok_or_else(err)?;

    if ordinal_str.is_empty() {
        return Ok(WeekdayNum::every(weekday));
    }
    let ordinal = ordinal_str
        .strip_prefix('+')
        .unwrap_or(ordinal_str)
        .parse::<i8>()
        .map_err(|_| err())?;
    Ok(WeekdayNum::nth(ordinal, weekday))
}

/// Unescapes text values (RFC 5545 §3.3.11).
///
/// Escape sequences: \\ \, \; \n \N
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(',') => result.push(','),
            Some(';') => result.push(';'),
            Some('\\') | None => result.push('\\'),
            Some(other) => {
                // Unknown escape, preserve as-is
                result.push('\\');
                result.push(other);
            }
        }
    }

    result
}

/// Splits a TEXT list on unescaped commas and unescapes each item.
#[must_use]
pub fn split_text_list(s: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for c in s.chars() {
        if escaped {
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            current.push(c);
            escaped = true;
        } else if c == ',' {
            items.push(unescape_text(&current));
            current.clear();
        } else {
            current.push(c);
        }
    }
    items.push(unescape_text(&current));
    items
}

/// Parses a BOOLEAN value (RFC 5545 §3.3.2).
///
/// ## Errors
/// Returns an error if the string is not "TRUE" or "FALSE".
pub fn parse_boolean(s: &str, line: usize, col: usize) -> ParseResult<bool> {
    match s.to_ascii_uppercase().as_str() {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        _ => Err(ParseError::new(ParseErrorKind::InvalidBoolean, line, col)),
    }
}

/// Parses an INTEGER value (RFC 5545 §3.3.8).
///
/// ## Errors
/// Returns an error if the string is not a valid integer.
pub fn parse_integer(s: &str, line: usize, col: usize) -> ParseResult<i32> {
    s.strip_prefix('+')
        .unwrap_or(s)
        .parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidInteger, line, col))
}

/// Parses a FLOAT value (RFC 5545 §3.3.7).
///
/// ## Errors
/// Returns an error if the string is not a valid floating-point number.
pub fn parse_float(s: &str, line: usize, col: usize) -> ParseResult<f64> {
    s.parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidFloat, line, col))
}

/// Parses a BINARY value (RFC 5545 §3.3.1), base64 encoded.
///
/// ## Errors
/// Returns an error if the string is not valid base64.
pub fn parse_binary(s: &str, line: usize, col: usize) -> ParseResult<Vec<u8>> {
    STANDARD
        .decode(s)
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidBinary, line, col))
}

/// Value types a property is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Binary,
    Boolean,
    CalAddress,
    Date,
    DateTime,
    Duration,
    Float,
    Integer,
    Period,
    Recur,
    Text,
    TextList,
    Uri,
    UtcOffset,
    Raw,
}

impl ValueKind {
    fn from_value_param(value_type: &str) -> Self {
        match value_type.to_ascii_uppercase().as_str() {
            "BINARY" => Self::Binary,
            "BOOLEAN" => Self::Boolean,
            "CAL-ADDRESS" => Self::CalAddress,
            "DATE" => Self::Date,
            "DATE-TIME" => Self::DateTime,
            "DURATION" => Self::Duration,
            "FLOAT" => Self::Float,
            "INTEGER" => Self::Integer,
            "PERIOD" => Self::Period,
            "RECUR" => Self::Recur,
            "TEXT" => Self::Text,
            "URI" => Self::Uri,
            "UTC-OFFSET" => Self::UtcOffset,
            _ => Self::Raw,
        }
    }

    /// Default value type per property name (RFC 5545 §3.7, §3.8).
    fn default_for(name: &str) -> Self {
        match name {
            names::DTSTART
            | names::DTEND
            | names::DUE
            | names::RECURRENCE_ID
            | names::DTSTAMP
            | names::CREATED
            | names::LAST_MODIFIED
            | names::COMPLETED
            | names::EXDATE
            | names::RDATE => Self::DateTime,
            names::DURATION | names::TRIGGER => Self::Duration,
            names::RRULE => Self::Recur,
            names::SEQUENCE | names::PRIORITY | names::PERCENT_COMPLETE | names::REPEAT => {
                Self::Integer
            }
            names::TZOFFSETFROM | names::TZOFFSETTO => Self::UtcOffset,
            names::ORGANIZER | names::ATTENDEE => Self::CalAddress,
            names::URL | names::TZURL | names::ATTACH => Self::Uri,
            names::CATEGORIES | names::RESOURCES => Self::TextList,
            names::FREEBUSY => Self::Period,
            names::SUMMARY
            | names::DESCRIPTION
            | names::LOCATION
            | names::COMMENT
            | names::UID
            | names::STATUS
            | names::CLASS
            | names::TRANSP
            | names::PRODID
            | names::VERSION
            | names::CALSCALE
            | names::METHOD
            | names::TZID
            | names::TZNAME
            | names::ACTION
            | names::CONTACT
            | names::RELATED_TO => Self::Text,
            _ => Self::Raw,
        }
    }
}

/// Properties whose values are comma-separated lists.
fn is_list_property(name: &str) -> bool {
    matches!(name, names::EXDATE | names::RDATE | names::FREEBUSY)
}

/// Resolves the typed value of a content line.
///
/// Experimental (`X-`) properties and unregistered names keep their raw value.
///
/// ## Errors
/// Returns an error if the raw value does not match the resolved value type.
pub fn parse_value(cl: &ContentLine, line: usize, col: usize) -> ParseResult<Value> {
    let raw = cl.raw_value.as_str();
    if cl.name.starts_with("X-") {
        return Ok(Value::Unknown(raw.to_string()));
    }

    let kind = cl
        .value_type()
        .map_or_else(|| ValueKind::default_for(&cl.name), ValueKind::from_value_param);
    let tzid = cl.tzid();
    let list = is_list_property(&cl.name);

    Ok(match kind {
        ValueKind::Binary => Value::Binary(parse_binary(raw, line, col)?),
        ValueKind::Boolean => Value::Boolean(parse_boolean(raw, line, col)?),
        ValueKind::CalAddress => Value::CalAddress(raw.to_string()),
        ValueKind::Date | ValueKind::DateTime => {
            let force_date = kind == ValueKind::Date;
            if list {
                Value::TemporalList(
                    raw.split(',')
                        .map(|v| parse_temporal(v, tzid, force_date, line, col))
                        .collect::<ParseResult<_>>()?,
                )
            } else {
                Value::Temporal(parse_temporal(raw, tzid, force_date, line, col)?)
            }
        }
        ValueKind::Duration => Value::Duration(parse_duration(raw, line, col)?),
        ValueKind::Float => Value::Float(parse_float(raw, line, col)?),
        ValueKind::Integer => Value::Integer(parse_integer(raw, line, col)?),
        ValueKind::Period => {
            if list {
                Value::PeriodList(
                    raw.split(',')
                        .map(|v| parse_period(v, tzid, line, col))
                        .collect::<ParseResult<_>>()?,
                )
            } else {
                Value::Period(parse_period(raw, tzid, line, col)?)
            }
        }
        ValueKind::Recur => Value::Recur(Box::new(parse_rrule(raw, line, col)?)),
        ValueKind::Text => Value::Text(unescape_text(raw)),
        ValueKind::TextList => Value::TextList(split_text_list(raw)),
        ValueKind::Uri => Value::Uri(raw.to_string()),
        ValueKind::UtcOffset => Value::UtcOffset(parse_utc_offset(raw, line, col)?),
        ValueKind::Raw => Value::Unknown(raw.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::Parameter;

    #[test]
    fn parse_date_basic() {
        assert_eq!(
            parse_date("20260123", 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 23).unwrap()
        );
    }

    #[test]
    fn parse_date_invalid() {
        assert!(parse_date("2026012", 1, 1).is_err());
        assert!(parse_date("20261301", 1, 1).is_err());
        assert!(parse_date("20260230", 1, 1).is_err());
        assert!(parse_date("INVALID!", 1, 1).is_err());
    }

    #[test]
    fn parse_datetime_forms() {
        assert_eq!(
            parse_datetime("20260123T120000Z", None, 1, 1).unwrap(),
            Temporal::utc(2026, 1, 23, 12, 0, 0).unwrap()
        );
        assert_eq!(
            parse_datetime("20260123T120000", None, 1, 1).unwrap(),
            Temporal::local(2026, 1, 23, 12, 0, 0).unwrap()
        );
        assert_eq!(
            parse_datetime("20260123T120000", Some("Europe/Paris"), 1, 1).unwrap(),
            Temporal::zoned(2026, 1, 23, 12, 0, 0, "Europe/Paris").unwrap()
        );
        assert!(parse_datetime("20260123T250000", None, 1, 1).is_err());
    }

    #[test]
    fn parse_temporal_infers_date() {
        assert!(parse_temporal("19970505", None, false, 1, 1).unwrap().is_date());
        assert!(parse_temporal("19970505T090000", None, true, 1, 1).is_err());
    }

    #[test]
    fn parse_duration_forms() {
        assert_eq!(parse_duration("P2W", 1, 1).unwrap(), Duration::weeks(2));
        assert_eq!(
            parse_duration("P1DT2H30M", 1, 1).unwrap(),
            Duration {
                days: 1,
                hours: 2,
                minutes: 30,
                ..Duration::zero()
            }
        );
        assert_eq!(
            parse_duration("-PT15M", 1, 1).unwrap(),
            Duration::minutes(15).negate()
        );
        assert_eq!(parse_duration("PT0S", 1, 1).unwrap(), Duration::zero());
        assert_eq!(parse_duration("P15DT5H0M20S", 1, 1).unwrap().as_seconds(), 1_314_020);
    }

    #[test]
    fn parse_duration_invalid() {
        for bad in ["", "P", "PT", "1D", "P1H", "PT1D", "P1W2D", "P1", "P1DT"] {
            assert!(parse_duration(bad, 1, 1).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn parse_utc_offset_forms() {
        assert_eq!(parse_utc_offset("+0530", 1, 1).unwrap().as_seconds(), 19_800);
        assert_eq!(parse_utc_offset("-0800", 1, 1).unwrap().as_seconds(), -28_800);
        assert_eq!(parse_utc_offset("+010203", 1, 1).unwrap().as_seconds(), 3_723);
        assert!(parse_utc_offset("0530", 1, 1).is_err());
    }

    #[test]
    fn parse_period_forms() {
        let explicit = parse_period("19970101T180000Z/19970102T070000Z", None, 1, 1).unwrap();
        assert!(matches!(explicit, Period::Explicit { .. }));
        let duration = parse_period("19970101T180000Z/PT5H30M", None, 1, 1).unwrap();
        assert!(matches!(duration, Period::Duration { .. }));
    }

    #[test]
    fn parse_rrule_keeps_layout() {
        let text = "FREQ=MONTHLY;BYDAY=FR;BYMONTHDAY=13";
        let rrule = parse_rrule(text, 1, 1).unwrap();
        assert_eq!(rrule.to_string(), text);

        let reordered = parse_rrule("BYMONTHDAY=13;FREQ=MONTHLY;BYDAY=FR", 1, 1).unwrap();
        assert_eq!(rrule, reordered);
        assert_eq!(reordered.to_string(), "BYMONTHDAY=13;FREQ=MONTHLY;BYDAY=FR");
    }

    #[test]
    fn parse_rrule_parts() {
        let rrule =
            parse_rrule("FREQ=YEARLY;INTERVAL=2;BYMONTH=1;BYDAY=-1SU,+2MO;UNTIL=20001231", 1, 1)
                .unwrap();
        assert_eq!(rrule.freq, Frequency::Yearly);
        assert_eq!(rrule.interval(), 2);
        assert_eq!(rrule.by_month(), &[1]);
        assert_eq!(
            rrule.by_day(),
            &[
                WeekdayNum::nth(-1, Weekday::Sunday),
                WeekdayNum::nth(2, Weekday::Monday)
            ]
        );
        assert_eq!(rrule.until(), Temporal::date(2000, 12, 31).as_ref());
    }

    #[test]
    fn parse_rrule_errors() {
        let kind = |s: &str| parse_rrule(s, 1, 1).unwrap_err().kind;
        assert_eq!(kind("COUNT=5"), ParseErrorKind::InvalidRRule);
        assert_eq!(kind("FREQ=FORTNIGHTLY"), ParseErrorKind::InvalidFrequency);
        assert_eq!(
            kind("FREQ=DAILY;COUNT=5;UNTIL=20260101"),
            ParseErrorKind::UntilCountConflict
        );
        assert_eq!(
            kind("FREQ=DAILY;BYHOUR=1;BYHOUR=2"),
            ParseErrorKind::DuplicateRulePart
        );
        assert_eq!(kind("FREQ=DAILY;FREQ=WEEKLY"), ParseErrorKind::DuplicateRulePart);
        assert_eq!(kind("FREQ=WEEKLY;BYDAY=XX"), ParseErrorKind::InvalidWeekday);
        assert_eq!(kind("FREQ=DAILY;BYSOMETHING=1"), ParseErrorKind::InvalidRRule);
    }

    #[test]
    fn unescape_sequences() {
        assert_eq!(unescape_text("a\\,b\\;c\\nd\\Ne\\\\f"), "a,b;c\nd\ne\\f");
        assert_eq!(unescape_text("keep\\x"), "keep\\x");
    }

    #[test]
    fn text_list_splits_on_unescaped_commas() {
        assert_eq!(
            split_text_list("APPOINTMENT,EDUCATION\\, ADULT,x"),
            vec!["APPOINTMENT", "EDUCATION, ADULT", "x"]
        );
    }

    #[test]
    fn parse_value_by_property() {
        let exdate = ContentLine::with_params(
            "EXDATE",
            vec![Parameter::tzid("America/New_York")],
            "19960402T010000,19960403T010000",
        );
        let value = parse_value(&exdate, 1, 1).unwrap();
        assert_eq!(value.as_temporal_list().map(<[Temporal]>::len), Some(2));

        let x_prop = ContentLine::new("X-CUSTOM", "anything;goes");
        assert_eq!(
            parse_value(&x_prop, 1, 1).unwrap(),
            Value::Unknown("anything;goes".into())
        );

        let geo = ContentLine::new("GEO", "37.386013;-122.082932");
        assert!(parse_value(&geo, 1, 1).unwrap().is_unknown());

        let attach = ContentLine::with_params(
            "ATTACH",
            vec![
                Parameter::new("ENCODING", "BASE64"),
                Parameter::value_type("BINARY"),
            ],
            "aGVsbG8=",
        );
        assert_eq!(
            parse_value(&attach, 1, 1).unwrap(),
            Value::Binary(b"hello".to_vec())
        );

        let bad = ContentLine::new("DTSTART", "INVALID");
        assert_eq!(
            parse_value(&bad, 1, 1).unwrap_err().kind,
            ParseErrorKind::InvalidDate
        );
    }
}
