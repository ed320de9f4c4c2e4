//! iCalendar DATE and DATE-TIME values (RFC 5545 §3.3.4, §3.3.5).
//!
//! A [`Temporal`] is one of four granularities. Every date-valued property of
//! a component is expected to share the granularity of its DTSTART, which is
//! what [`DateTimeType`] is compared on.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::rfc::ical::expand::timezone;

/// Granularity discriminant of a [`Temporal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateTimeType {
    /// `VALUE=DATE`, no time of day.
    Date,
    /// Floating date-time without zone information.
    DateWithLocalTime,
    /// Date-time with a `TZID` parameter.
    DateWithLocalTimeAndTimeZone,
    /// Date-time with the `Z` suffix.
    DateWithUtcTime,
}

impl DateTimeType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::DateWithLocalTime => "DATE_WITH_LOCAL_TIME",
            Self::DateWithLocalTimeAndTimeZone => "DATE_WITH_LOCAL_TIME_AND_TIME_ZONE",
            Self::DateWithUtcTime => "DATE_WITH_UTC_TIME",
        }
    }
}

impl fmt::Display for DateTimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A date or date-time value.
///
/// Ordering is by position on the UTC timeline. Zoned values are resolved
/// through the IANA database, floating values and dates use their wall clock.
/// Values that land on the same instant are ordered by granularity, then
/// TZID, then wall clock, so `Ord` agrees with `Eq`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Temporal {
    Date(NaiveDate),
    Local(NaiveDateTime),
    Zoned { local: NaiveDateTime, tzid: String },
    Utc(DateTime<Utc>),
}

impl Temporal {
    /// Creates a DATE value, or `None` if the date does not exist.
    #[must_use]
    pub fn date(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::Date)
    }

    /// Creates a floating date-time.
    #[must_use]
    pub fn local(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        naive(year, month, day, hour, min, sec).map(Self::Local)
    }

    /// Creates a date-time bound to `tzid`.
    #[must_use]
    #[expect(
        clippy::too_many_arguments,
        reason = "Mirrors the field layout of a zoned DATE-TIME"
    )]
    pub fn zoned(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
        tzid: impl Into<String>,
    ) -> Option<Self> {
        naive(year, month, day, hour, min, sec).map(|local| Self::Zoned {
            local,
            tzid: tzid.into(),
        })
    }

    /// Creates a UTC date-time.
    #[must_use]
    pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        naive(year, month, day, hour, min, sec).map(|dt| Self::Utc(Utc.from_utc_datetime(&dt)))
    }

    #[must_use]
    pub const fn date_time_type(&self) -> DateTimeType {
        match self {
            Self::Date(_) => DateTimeType::Date,
            Self::Local(_) => DateTimeType::DateWithLocalTime,
            Self::Zoned { .. } => DateTimeType::DateWithLocalTimeAndTimeZone,
            Self::Utc(_) => DateTimeType::DateWithUtcTime,
        }
    }

    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match self {
            Self::Zoned { tzid, .. } => Some(tzid),
            _ => None,
        }
    }

    /// Calendar date of the wall clock.
    #[must_use]
    pub fn date_part(&self) -> NaiveDate {
        self.wall_clock().date()
    }

    /// Wall-clock fields of this value. Dates map to midnight and UTC values
    /// to their UTC fields.
    #[must_use]
    pub fn wall_clock(&self) -> NaiveDateTime {
        match self {
            Self::Date(d) => d.and_time(chrono::NaiveTime::MIN),
            Self::Local(dt) | Self::Zoned { local: dt, .. } => *dt,
            Self::Utc(dt) => dt.naive_utc(),
        }
    }

    /// Returns a value of the same granularity (and zone) with the given wall clock.
    #[must_use]
    pub fn with_wall_clock(&self, wall: NaiveDateTime) -> Self {
        match self {
            Self::Date(_) => Self::Date(wall.date()),
            Self::Local(_) => Self::Local(wall),
            Self::Zoned { tzid, .. } => Self::Zoned {
                local: wall,
                tzid: tzid.clone(),
            },
            Self::Utc(_) => Self::Utc(Utc.from_utc_datetime(&wall)),
        }
    }

    /// Position on the UTC timeline as a naive UTC date-time.
    ///
    /// Floating values and dates are read as if they were UTC. A zoned value
    /// with an unknown TZID falls back to its wall clock.
    #[must_use]
    pub fn instant(&self) -> NaiveDateTime {
        match self {
            Self::Date(_) | Self::Local(_) => self.wall_clock(),
            Self::Zoned { local, tzid } => timezone::local_to_utc(*local, tzid)
                .map_or(*local, |utc| utc.naive_utc()),
            Self::Utc(dt) => dt.naive_utc(),
        }
    }

    /// Converts to UTC, resolving zones. Floating values and dates are read as UTC.
    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.instant())
    }
}

fn naive(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, min, sec)
}

impl Ord for Temporal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant()
            .cmp(&other.instant())
            .then_with(|| self.date_time_type().cmp(&other.date_time_type()))
            .then_with(|| self.tzid().cmp(&other.tzid()))
            .then_with(|| self.wall_clock().cmp(&other.wall_clock()))
    }
}

impl PartialOrd for Temporal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Content encoding. The TZID of a zoned value travels as a property parameter.
impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wall = self.wall_clock();
        write!(f, "{:04}{:02}{:02}", wall.year(), wall.month(), wall.day())?;
        if self.is_date() {
            return Ok(());
        }
        write!(
            f,
            "T{:02}{:02}{:02}",
            wall.hour(),
            wall.minute(),
            wall.second()
        )?;
        if matches!(self, Self::Utc(_)) {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

/// UTC offset representation (e.g., +0530, -0800).
///
/// Stored as total seconds from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcOffset {
    seconds: i32,
}

impl UtcOffset {
    /// Creates a UTC offset from total seconds.
    #[must_use]
    pub const fn from_seconds(seconds: i32) -> Self {
        Self { seconds }
    }

    #[must_use]
    pub const fn as_seconds(self) -> i32 {
        self.seconds
    }

    /// UTC offset (zero).
    pub const UTC: Self = Self { seconds: 0 };
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds >= 0 { '+' } else { '-' };
        let abs = self.seconds.abs();
        write!(f, "{sign}{:02}{:02}", abs / 3600, (abs % 3600) / 60)?;
        if abs % 60 != 0 {
            write!(f, "{:02}", abs % 60)?;
        }
        Ok(())
    }
}
