//! Cached recurrence streams.
//!
//! A component's occurrences are the rule expansion (or DTSTART alone when
//! there is no rule) merged with RDATE values, minus EXDATE values. The
//! cache keeps the prefix computed so far so later queries resume from it.

use std::collections::VecDeque;
use std::iter::Peekable;

use super::engine::{RecurrenceIter, RecurrenceLimits};
use crate::rfc::ical::core::{Component, DateTimeType, Temporal};

/// Primary occurrence source of a component.
#[derive(Debug, Clone)]
enum Primary {
    Rule(Box<RecurrenceIter>),
    Start(std::option::IntoIter<Temporal>),
}

impl Iterator for Primary {
    type Item = Temporal;

    fn next(&mut self) -> Option<Temporal> {
        match self {
            Self::Rule(iter) => iter.next(),
            Self::Start(iter) => iter.next(),
        }
    }
}

/// Merges the primary source with RDATEs and removes EXDATEs.
#[derive(Debug, Clone)]
struct MergedSource {
    primary: Peekable<Primary>,
    rdates: VecDeque<Temporal>,
    exdates: Vec<Temporal>,
    last: Option<Temporal>,
}

impl MergedSource {
    fn new(component: &Component, limits: RecurrenceLimits) -> Self {
        let dtstart = component.dtstart();
        let expected = dtstart.map(Temporal::date_time_type);
        let matching = |values: Vec<&Temporal>, property: &str| -> Vec<Temporal> {
            let mut kept: Vec<Temporal> = values
                .into_iter()
                .filter(|t| {
                    let keep = same_type(expected, t);
                    if !keep {
                        tracing::trace!(property, value = %t, "Skipping value of mismatched type");
                    }
                    keep
                })
                .cloned()
                .collect();
            kept.sort();
            kept.dedup();
            kept
        };

        let primary = match (dtstart, component.rrule()) {
            (Some(start), Some(rrule)) => {
                Primary::Rule(Box::new(RecurrenceIter::new(rrule, start.clone(), limits)))
            }
            (start, _) => Primary::Start(start.cloned().into_iter()),
        };

        Self {
            primary: primary.peekable(),
            rdates: matching(component.rdates(), "RDATE").into(),
            exdates: matching(component.exdates(), "EXDATE"),
            last: None,
        }
    }
}

fn same_type(expected: Option<DateTimeType>, value: &Temporal) -> bool {
    expected.is_none_or(|ty| ty == value.date_time_type())
}

impl Iterator for MergedSource {
    type Item = Temporal;

    fn next(&mut self) -> Option<Temporal> {
        loop {
            let take_rdate = match (self.primary.peek(), self.rdates.front()) {
                (Some(generated), Some(rdate)) => rdate < generated,
                (None, Some(_)) => true,
                (_, None) => false,
            };
            let value = if take_rdate {
                self.rdates.pop_front()
            } else {
                self.primary.next()
            }?;

            if self.last.as_ref().is_some_and(|last| value <= *last)
                || self.exdates.binary_search(&value).is_ok()
            {
                continue;
            }
            self.last = Some(value.clone());
            return Some(value);
        }
    }
}

/// Per-component cache of computed occurrences.
///
/// Holds the highest contiguous prefix generated so far and the source it
/// resumes from. Counters make reuse observable.
#[derive(Debug, Clone, Default)]
pub struct RecurrenceCache {
    values: Vec<Temporal>,
    source: Option<MergedSource>,
    exhausted: bool,
    generated: u64,
    rebuilds: u64,
    limits: RecurrenceLimits,
}

impl RecurrenceCache {
    /// An empty cache with the same limits.
    #[must_use]
    pub fn fresh(&self) -> Self {
        Self {
            limits: self.limits,
            ..Self::default()
        }
    }

    pub(crate) fn set_limits(&mut self, limits: RecurrenceLimits) {
        self.limits = limits;
        self.invalidate();
    }

    #[must_use]
    pub const fn limits(&self) -> RecurrenceLimits {
        self.limits
    }

    /// Drops cached values. The counters are kept.
    pub(crate) fn invalidate(&mut self) {
        self.values.clear();
        self.source = None;
        self.exhausted = false;
    }

    /// Total values computed over the cache's lifetime.
    #[must_use]
    pub const fn generated(&self) -> u64 {
        self.generated
    }

    /// Number of times the source was rebuilt from the component.
    #[must_use]
    pub const fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// The cached prefix.
    #[must_use]
    pub fn values(&self) -> &[Temporal] {
        &self.values
    }

    /// Whether every occurrence has been computed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Computes one more value. Returns `false` once the source is done.
    fn extend(&mut self, component: &Component) -> bool {
        if self.exhausted {
            return false;
        }
        if self.source.is_none() {
            tracing::trace!(component = %component.name(), "Building recurrence source");
            self.source = Some(MergedSource::new(component, self.limits));
            self.rebuilds += 1;
        }

        let Some(value) = self.source.as_mut().and_then(Iterator::next) else {
            self.exhausted = true;
            return false;
        };
        self.values.push(value);
        self.generated += 1;
        true
    }

    /// Extends the prefix until its last value reaches `bound`.
    fn extend_to(&mut self, component: &Component, bound: &Temporal) {
        while self.values.last().is_none_or(|last| last < bound) && self.extend(component) {}
    }

    /// The value at `index`, computing up to it as needed.
    pub(crate) fn value_at(&mut self, component: &Component, index: usize) -> Option<Temporal> {
        while self.values.len() <= index {
            if !self.extend(component) {
                return None;
            }
        }
        self.values.get(index).cloned()
    }

    /// Index of the first value at or after `from`.
    pub(crate) fn seek(&mut self, component: &Component, from: &Temporal) -> usize {
        self.extend_to(component, from);
        self.values.partition_point(|v| v < from)
    }

    /// The latest value strictly before `before`.
    pub fn previous_value(&mut self, component: &Component, before: &Temporal) -> Option<Temporal> {
        self.extend_to(component, before);
        let index = self.values.partition_point(|v| v < before);
        index.checked_sub(1).and_then(|i| self.values.get(i).cloned())
    }
}

/// Restartable iterator over a component's occurrences.
///
/// Borrows the component and takes a short mutable borrow of its cache per
/// step, so values already cached are never recomputed.
#[derive(Debug)]
pub struct Recurrences<'a> {
    component: &'a Component,
    index: Option<usize>,
    from: Option<Temporal>,
}

impl<'a> Recurrences<'a> {
    pub(crate) const fn new(component: &'a Component, from: Option<Temporal>) -> Self {
        Self {
            component,
            index: None,
            from,
        }
    }
}

impl Iterator for Recurrences<'_> {
    type Item = Temporal;

    fn next(&mut self) -> Option<Temporal> {
        let mut cache = self.component.recurrence_cell().borrow_mut();
        let index = match (self.index, &self.from) {
            (Some(index), _) => index,
            (None, Some(from)) => cache.seek(self.component, from),
            (None, None) => 0,
        };

        let value = cache.value_at(self.component, index);
        self.index = Some(if value.is_some() { index + 1 } else { index });
        value
    }
}
