//! Busy-time conflict detection between a candidate component and a set of
//! existing ones.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use icalfx_core::config::ConflictConfig;
use icalfx_core::constants::DEFAULT_CONFLICT_MAX_OCCURRENCES;
use icalfx_rfc::rfc::ical::core::{Component, ICalendar, Temporal};

use crate::error::{ServiceError, ServiceResult};

/// Options for a conflict sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictOptions {
    /// Occurrences pulled per component before giving up.
    pub max_occurrences: usize,
}

impl Default for ConflictOptions {
    fn default() -> Self {
        Self {
            max_occurrences: horizon(DEFAULT_CONFLICT_MAX_OCCURRENCES),
        }
    }
}

impl From<&ConflictConfig> for ConflictOptions {
    fn from(config: &ConflictConfig) -> Self {
        Self {
            max_occurrences: horizon(config.max_occurrences),
        }
    }
}

fn horizon(max_occurrences: u32) -> usize {
    usize::try_from(max_occurrences).unwrap_or(usize::MAX)
}

/// The first busy-time collision with an existing component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// UID of the existing component.
    pub uid: String,
    /// The colliding occurrence of the existing component.
    pub occurrence: Temporal,
}

impl Conflict {
    /// Request status text for the conflict (RFC 5546 §3.6).
    #[must_use]
    pub fn status(&self) -> String {
        format!("4.1;Event conflict with {self}")
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.uid, self.occurrence)
    }
}

/// One occurrence as a half-open UTC interval.
#[derive(Debug, Clone)]
struct Busy {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Busy {
    fn new(occurrence: &Temporal, length: TimeDelta) -> Self {
        let start = occurrence.to_utc();
        Self {
            start,
            end: start.checked_add_signed(length).unwrap_or(start),
        }
    }
}

/// Components that never block time.
fn is_skipped(component: &Component) -> bool {
    !component.kind().is_schedulable() || component.is_transparent()
}

/// Length of every occurrence of `component`.
///
/// DTEND (or DUE) minus DTSTART, else DURATION. Without either a DATE start
/// lasts one day and a DATE-TIME start has no length.
fn busy_length(component: &Component) -> TimeDelta {
    let Some(start) = component.dtstart() else {
        return TimeDelta::zero();
    };

    let length = match (
        component.dtend().or_else(|| component.due()),
        component.duration(),
    ) {
        (Some(end), _) => end.to_utc().signed_duration_since(start.to_utc()),
        (None, Some(duration)) => duration.to_time_delta(),
        (None, None) if start.is_date() => TimeDelta::days(1),
        (None, None) => TimeDelta::zero(),
    };
    length.max(TimeDelta::zero())
}

/// ## Summary
/// Finds the earliest busy-time overlap between `candidate` and `existing`.
///
/// Transparent and non-schedulable components are ignored, as are existing
/// components sharing the candidate's UID and the candidate itself when it
/// appears in `existing`. Overlaps are ordered by the later
/// of the two colliding starts. Each component contributes at most
/// `options.max_occurrences` occurrences.
#[must_use]
pub fn detect_conflict(
    candidate: &Component,
    existing: &[Component],
    options: &ConflictOptions,
) -> Option<Conflict> {
    let uid = candidate.uid();
    if is_skipped(candidate) {
        tracing::trace!(uid = ?uid, "Candidate does not block time");
        return None;
    }

    let candidate_length = busy_length(candidate);
    let candidate_busy: Vec<Busy> = candidate
        .recurrences()
        .take(options.max_occurrences)
        .map(|occurrence| Busy::new(&occurrence, candidate_length))
        .collect();
    if candidate_busy.is_empty() {
        return None;
    }

    let mut best: Option<(DateTime<Utc>, Conflict)> = None;
    for other in existing {
        if is_skipped(other)
            || std::ptr::eq(other, candidate)
            || (uid.is_some() && other.uid() == uid)
        {
            continue;
        }

        let length = busy_length(other);
        for occurrence in other.recurrences().take(options.max_occurrences) {
            let busy = Busy::new(&occurrence, length);
            if best.as_ref().is_some_and(|(key, _)| busy.start >= *key) {
                break;
            }

            // Candidate intervals share one length, so their ends ascend too.
            let first = candidate_busy.partition_point(|c| c.end <= busy.start);
            let Some(hit) = candidate_busy.get(first).filter(|c| c.start < busy.end) else {
                continue;
            };

            let key = hit.start.max(busy.start);
            if best.as_ref().is_none_or(|(best_key, _)| key < *best_key) {
                best = Some((
                    key,
                    Conflict {
                        uid: other.uid().unwrap_or_default().to_string(),
                        occurrence,
                    },
                ));
            }
            // Later occurrences of this component only collide later.
            break;
        }
    }

    tracing::debug!(
        uid = ?uid,
        existing = existing.len(),
        conflict = ?best.as_ref().map(|(_, c)| c.to_string()),
        "Conflict sweep finished"
    );
    best.map(|(_, conflict)| conflict)
}

/// ## Summary
/// Checks the component with UID `candidate_uid` against the rest of
/// `calendar`.
///
/// ## Errors
/// Returns `NotFound` if no top-level component has the UID, and
/// `ValidationError` if it has no DTSTART.
pub fn find_conflict(
    calendar: &ICalendar,
    candidate_uid: &str,
    options: &ConflictOptions,
) -> ServiceResult<Option<Conflict>> {
    let candidate = calendar
        .find_by_uid(candidate_uid)
        .ok_or_else(|| ServiceError::NotFound(format!("component with UID {candidate_uid}")))?;
    if candidate.dtstart().is_none() {
        return Err(ServiceError::ValidationError(format!(
            "{candidate_uid} has no DTSTART"
        )));
    }

    Ok(detect_conflict(
        candidate,
        &calendar.root.children,
        options,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use icalfx_rfc::rfc::ical::core::{Duration, Property, RRule, names};

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> Temporal {
        Temporal::local(y, m, d, h, min, 0).unwrap()
    }

    fn event(uid: &str, start: Temporal, end: Option<Temporal>, rrule: Option<RRule>) -> Component {
        let mut event = Component::event();
        event.add_property(Property::text(names::UID, uid));
        event.add_property(Property::temporal(names::DTSTART, start));
        if let Some(end) = end {
            event.add_property(Property::temporal(names::DTEND, end));
        }
        if let Some(rrule) = rrule {
            event.add_property(Property::recur(names::RRULE, rrule));
        }
        event
    }

    fn yearly_meeting() -> Component {
        event(
            "yearly@example.com",
            local(2015, 11, 9, 10, 0),
            Some(local(2015, 11, 9, 11, 0)),
            Some(RRule::yearly()),
        )
    }

    fn daily_candidate() -> Component {
        event(
            "daily@example.com",
            local(2015, 11, 10, 10, 30),
            Some(local(2015, 11, 10, 11, 30)),
            Some(RRule::daily()),
        )
    }

    #[test_log::test]
    fn yearly_meeting_collides_with_new_daily_event() {
        let conflict = detect_conflict(
            &daily_candidate(),
            &[yearly_meeting()],
            &ConflictOptions::default(),
        )
        .expect("should conflict");

        assert_eq!(conflict.uid, "yearly@example.com");
        assert_eq!(conflict.occurrence, local(2016, 11, 9, 10, 0));
    }

    #[test]
    fn horizon_limits_the_sweep() {
        let options = ConflictOptions { max_occurrences: 3 };
        assert_eq!(
            detect_conflict(&daily_candidate(), &[yearly_meeting()], &options),
            None
        );
    }

    #[test]
    fn transparent_and_same_uid_components_are_ignored() {
        let mut transparent = yearly_meeting();
        transparent.add_property(Property::text(names::TRANSP, "TRANSPARENT"));
        let options = ConflictOptions::default();
        assert_eq!(
            detect_conflict(&daily_candidate(), &[transparent], &options),
            None
        );

        let mut previous_version = daily_candidate();
        previous_version.set_property(Property::temporal(
            names::DTSTART,
            local(2015, 11, 10, 10, 0),
        ));
        assert_eq!(
            detect_conflict(&daily_candidate(), &[previous_version], &options),
            None
        );
    }

    #[test]
    fn candidate_without_uid_skips_itself() {
        let mut anonymous = Component::event();
        anonymous.add_property(Property::temporal(names::DTSTART, local(2026, 4, 1, 9, 0)));
        anonymous.add_property(Property::temporal(names::DTEND, local(2026, 4, 1, 10, 0)));
        let existing = vec![anonymous, yearly_meeting()];
        let options = ConflictOptions::default();

        assert_eq!(detect_conflict(&existing[0], &existing, &options), None);

        // An equal copy is a different component and still collides
        let copy = existing[0].clone();
        assert_eq!(
            detect_conflict(&copy, &existing, &options),
            Some(Conflict {
                uid: String::new(),
                occurrence: local(2026, 4, 1, 9, 0),
            })
        );
    }

    #[test]
    fn date_start_blocks_the_whole_day() {
        let all_day = event(
            "holiday@example.com",
            Temporal::date(2026, 3, 2).unwrap(),
            None,
            None,
        );
        let options = ConflictOptions::default();

        let afternoon = event(
            "afternoon@example.com",
            local(2026, 3, 2, 15, 0),
            Some(local(2026, 3, 2, 16, 0)),
            None,
        );
        assert_eq!(
            detect_conflict(&afternoon, std::slice::from_ref(&all_day), &options)
                .map(|c| c.occurrence),
            Some(Temporal::date(2026, 3, 2).unwrap())
        );

        let next_midnight = event(
            "midnight@example.com",
            local(2026, 3, 3, 0, 0),
            Some(local(2026, 3, 3, 1, 0)),
            None,
        );
        assert_eq!(detect_conflict(&next_midnight, &[all_day], &options), None);
    }

    #[test]
    fn duration_sets_the_busy_length() {
        let mut existing = event("long@example.com", local(2026, 5, 1, 9, 0), None, None);
        existing.add_property(Property::duration(names::DURATION, Duration::hours(3)));
        let candidate = event(
            "late@example.com",
            local(2026, 5, 1, 11, 30),
            Some(local(2026, 5, 1, 12, 0)),
            None,
        );
        assert!(detect_conflict(&candidate, &[existing], &ConflictOptions::default()).is_some());
    }

    #[test]
    fn earliest_overlap_wins() {
        let candidate = event(
            "candidate@example.com",
            local(2026, 3, 1, 9, 0),
            Some(local(2026, 3, 1, 10, 0)),
            Some(RRule::daily()),
        );
        let later = event(
            "later@example.com",
            local(2026, 3, 10, 9, 0),
            Some(local(2026, 3, 10, 9, 30)),
            None,
        );
        let sooner = event(
            "sooner@example.com",
            local(2026, 3, 5, 9, 15),
            Some(local(2026, 3, 5, 9, 45)),
            None,
        );

        let conflict = detect_conflict(&candidate, &[later, sooner], &ConflictOptions::default())
            .expect("should conflict");
        assert_eq!(conflict.uid, "sooner@example.com");
        assert_eq!(conflict.occurrence, local(2026, 3, 5, 9, 15));
    }

    #[test]
    fn display_and_status() {
        let conflict = Conflict {
            uid: "yearly@example.com".to_string(),
            occurrence: local(2016, 11, 9, 10, 0),
        };
        assert_eq!(conflict.to_string(), "yearly@example.com, 20161109T100000");
        assert_eq!(
            conflict.status(),
            "4.1;Event conflict with yearly@example.com, 20161109T100000"
        );
    }

    #[test]
    fn find_conflict_by_uid() {
        let mut calendar = ICalendar::default();
        calendar.add_component(yearly_meeting());
        calendar.add_component(daily_candidate());
        let options = ConflictOptions::default();

        let conflict = find_conflict(&calendar, "daily@example.com", &options)
            .unwrap()
            .expect("should conflict");
        assert_eq!(conflict.occurrence, local(2016, 11, 9, 10, 0));

        assert!(matches!(
            find_conflict(&calendar, "missing@example.com", &options),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn options_from_config() {
        let options = ConflictOptions::from(&ConflictConfig { max_occurrences: 10 });
        assert_eq!(options.max_occurrences, 10);
        assert_eq!(ConflictOptions::default().max_occurrences, 5_000);
    }
}
