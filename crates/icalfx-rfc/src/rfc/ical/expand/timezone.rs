//! Timezone resolution and UTC conversion for iCalendar date-times.
//!
//! Uses ICU4X for Windows timezone ID to IANA mapping and timezone canonicalization.

use std::cell::RefCell;
use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;

/// Error during timezone conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Non-existent time during DST gap, even after shifting forward.
    #[error("Non-existent time (DST gap): {0}")]
    NonExistentTime(String),
}

/// Resolver for timezone identifiers.
///
/// Caches both hits and misses, keyed by the TZID as written.
#[derive(Debug, Default)]
pub struct TimeZoneResolver {
    cache: HashMap<String, Option<Tz>>,
}

thread_local! {
    static RESOLVER: RefCell<TimeZoneResolver> = RefCell::new(TimeZoneResolver::new());
}

impl TimeZoneResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Resolves a timezone identifier to a `chrono_tz::Tz`.
    ///
    /// Vendor prefixes and Windows zone names are normalized first.
    ///
    /// ## Errors
    ///
    /// Returns `ConversionError::UnknownTimezone` if the TZID cannot be resolved.
    pub fn resolve(&mut self, tzid: &str) -> Result<Tz, ConversionError> {
        let resolved = *self.cache.entry(tzid.to_string()).or_insert_with(|| {
            let normalized = normalize_tzid(tzid);
            let tz = Tz::from_str(&normalized).ok();
            if tz.is_none() {
                tracing::debug!(tzid, "Unknown TZID, falling back to wall clock");
            }
            tz
        });

        resolved.ok_or_else(|| ConversionError::UnknownTimezone(tzid.to_string()))
    }

    /// ## Summary
    /// Converts a local datetime to UTC in the zone named by `tzid`.
    ///
    /// Ambiguous times (DST fold) take the earlier instant. Non-existent
    /// times (DST gap) are shifted forward by one hour.
    ///
    /// ## Errors
    ///
    /// Returns an error if the zone is unknown or the shifted time still
    /// does not exist.
    pub fn to_utc(
        &mut self,
        local: NaiveDateTime,
        tzid: &str,
    ) -> Result<DateTime<Utc>, ConversionError> {
        let tz = self.resolve(tzid)?;

        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
            LocalResult::None => {
                let shifted = local + TimeDelta::hours(1);
                tz.from_local_datetime(&shifted)
                    .earliest()
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok_or_else(|| {
                        ConversionError::NonExistentTime(format!("{local} in timezone {tzid}"))
                    })
            }
        }
    }
}

/// Normalizes common CalDAV/iCalendar timezone identifiers to IANA names.
///
/// Strips vendor prefixes, maps Windows names through ICU4X, and
/// canonicalizes IANA aliases.
#[must_use]
pub fn normalize_tzid(tzid: &str) -> String {
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(tzid);

    let iana_parser = IanaParserExtended::new();

    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(stripped, None) {
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    stripped.to_string()
}

/// ## Summary
/// Converts a local datetime to UTC using the thread's shared resolver.
///
/// ## Errors
///
/// See [`TimeZoneResolver::to_utc`].
pub fn local_to_utc(local: NaiveDateTime, tzid: &str) -> Result<DateTime<Utc>, ConversionError> {
    RESOLVER.with_borrow_mut(|resolver| resolver.to_utc(local, tzid))
}
