//! Recurrence rule expansion (RFC 5545 §3.3.10).
//!
//! Candidates are built one period at a time from wall-clock fields. A day
//! belongs to a period's set when it passes every BY-rule filter, which is
//! the same as expanding by one rule and limiting by the others. Zoned
//! seeds keep their wall-clock time across daylight-saving transitions.

use std::collections::VecDeque;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use icalfx_core::config::RecurrenceConfig;
use icalfx_core::constants::{DEFAULT_MAX_EMPTY_PERIODS, DEFAULT_MAX_YEAR};

use crate::rfc::ical::core::{Frequency, RRule, Temporal, Terminator};

const SECONDS_PER_DAY: i64 = 86_400;

/// Safety bounds for open-ended expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceLimits {
    /// Consecutive periods without a single emitted value before giving up.
    pub max_empty_periods: u32,
    /// Last calendar year generated into.
    pub max_year: i32,
}

impl Default for RecurrenceLimits {
    fn default() -> Self {
        Self {
            max_empty_periods: DEFAULT_MAX_EMPTY_PERIODS,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

impl From<&RecurrenceConfig> for RecurrenceLimits {
    fn from(config: &RecurrenceConfig) -> Self {
        Self {
            max_empty_periods: config.max_empty_periods,
            max_year: config.max_year,
        }
    }
}

/// BY-rules that apply to the rule's frequency, widened for arithmetic.
///
/// Rules that do not combine with the frequency (BYWEEKNO outside YEARLY,
/// BYYEARDAY under DAILY/WEEKLY/MONTHLY, BYMONTHDAY under WEEKLY) are
/// dropped here. BYDAY ordinals only count under MONTHLY and YEARLY;
/// elsewhere the entry selects every matching weekday.
#[derive(Debug, Clone)]
struct Plan {
    freq: Frequency,
    interval: i64,
    months: Vec<u32>,
    week_nos: Vec<i64>,
    year_days: Vec<i64>,
    month_days: Vec<i64>,
    weekdays: Vec<chrono::Weekday>,
    nth_weekdays: Vec<(i64, chrono::Weekday)>,
    hours: Vec<u32>,
    minutes: Vec<u32>,
    seconds: Vec<u32>,
    set_pos: Vec<i64>,
    wkst: chrono::Weekday,
}

impl Plan {
    fn new(rrule: &RRule) -> Self {
        let freq = rrule.freq;
        let ordinals = matches!(freq, Frequency::Monthly | Frequency::Yearly);

        let mut weekdays = Vec::new();
        let mut nth_weekdays = Vec::new();
        for day in rrule.by_day() {
            match day.ordinal {
                Some(n) if ordinals => nth_weekdays.push((i64::from(n), day.weekday.to_chrono())),
                _ => weekdays.push(day.weekday.to_chrono()),
            }
        }

        let year_days = if matches!(
            freq,
            Frequency::Daily | Frequency::Weekly | Frequency::Monthly
        ) {
            Vec::new()
        } else {
            widen(rrule.by_year_day())
        };

        Self {
            freq,
            interval: i64::from(rrule.interval().max(1)),
            months: rrule.by_month().iter().map(|&m| u32::from(m)).collect(),
            week_nos: if freq == Frequency::Yearly {
                widen(rrule.by_week_no())
            } else {
                Vec::new()
            },
            year_days,
            month_days: if freq == Frequency::Weekly {
                Vec::new()
            } else {
                widen(rrule.by_month_day())
            },
            weekdays,
            nth_weekdays,
            hours: rrule.by_hour().iter().map(|&h| u32::from(h)).collect(),
            minutes: rrule.by_minute().iter().map(|&m| u32::from(m)).collect(),
            seconds: rrule.by_second().iter().map(|&s| u32::from(s)).collect(),
            set_pos: widen(rrule.by_set_pos()),
            wkst: rrule.wkst().to_chrono(),
        }
    }

    /// Whether any day-selecting rule is in effect. Without one, the day
    /// comes from the seed.
    fn selects_days(&self) -> bool {
        !self.week_nos.is_empty()
            || !self.year_days.is_empty()
            || !self.month_days.is_empty()
            || !self.weekdays.is_empty()
            || !self.nth_weekdays.is_empty()
    }

    fn matches_date(&self, date: NaiveDate, seed: NaiveDate) -> bool {
        if !self.months.is_empty() && !self.months.contains(&date.month()) {
            return false;
        }
        if !self.week_nos.is_empty() && !self.matches_week_no(date) {
            return false;
        }
        if !self.year_days.is_empty()
            && !matches_signed(
                &self.year_days,
                i64::from(date.ordinal()),
                days_in_year(date.year()),
            )
        {
            return false;
        }
        if !self.month_days.is_empty()
            && !matches_signed(&self.month_days, i64::from(date.day()), days_in_month(date))
        {
            return false;
        }
        if (!self.weekdays.is_empty() || !self.nth_weekdays.is_empty())
            && !self.matches_weekday(date)
        {
            return false;
        }

        if self.selects_days() {
            return true;
        }
        match self.freq {
            Frequency::Yearly => {
                (!self.months.is_empty() || date.month() == seed.month()) && date.day() == seed.day()
            }
            Frequency::Monthly => date.day() == seed.day(),
            Frequency::Weekly => date.weekday() == seed.weekday(),
            _ => true,
        }
    }

    fn matches_week_no(&self, date: NaiveDate) -> bool {
        let Some((week_year, week)) = week_number(date, self.wkst) else {
            return false;
        };
        weeks_in_year(week_year, self.wkst)
            .is_some_and(|total| matches_signed(&self.week_nos, week, total))
    }

    fn matches_weekday(&self, date: NaiveDate) -> bool {
        let weekday = date.weekday();
        if self.weekdays.contains(&weekday) {
            return true;
        }
        if self.nth_weekdays.is_empty() {
            return false;
        }

        let scope = if self.freq == Frequency::Monthly || !self.months.is_empty() {
            month_bounds(date)
        } else {
            year_bounds(date.year())
        };
        let Some((first, last)) = scope else {
            return false;
        };
        let from_start = (date - first).num_days() / 7 + 1;
        let from_end = -((last - date).num_days() / 7 + 1);

        self.nth_weekdays
            .iter()
            .any(|&(n, day)| day == weekday && (n == from_start || n == from_end))
    }

    /// Days of the `k`-th period for DAILY and coarser frequencies.
    fn period_days(&self, seed: NaiveDate, k: i64) -> Option<Vec<NaiveDate>> {
        let step = k.checked_mul(self.interval)?;
        let (first, last) = match self.freq {
            Frequency::Yearly => {
                let year = i32::try_from(i64::from(seed.year()).checked_add(step)?).ok()?;
                year_bounds(year)?
            }
            Frequency::Monthly => {
                let index = (i64::from(seed.year()) * 12 + i64::from(seed.month0()))
                    .checked_add(step)?;
                let year = i32::try_from(index.div_euclid(12)).ok()?;
                let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
                month_bounds(NaiveDate::from_ymd_opt(year, month, 1)?)?
            }
            Frequency::Weekly => {
                let week_start =
                    seed.checked_sub_days(Days::new(days_since(seed.weekday(), self.wkst)))?;
                let first = add_days(week_start, step.checked_mul(7)?)?;
                (first, first.checked_add_days(Days::new(6))?)
            }
            _ => {
                let day = add_days(seed, step)?;
                (day, day)
            }
        };

        Some(first.iter_days().take_while(|d| *d <= last).collect())
    }

    /// Start of the `k`-th period for HOURLY and finer frequencies.
    fn period_floor(&self, seed: NaiveDateTime, k: i64) -> Option<NaiveDateTime> {
        let step = k.checked_mul(self.interval)?;
        let base = match self.freq {
            Frequency::Hourly => seed.with_minute(0)?.with_second(0)?,
            Frequency::Minutely => seed.with_second(0)?,
            _ => seed,
        };
        base.checked_add_signed(TimeDelta::try_seconds(step.checked_mul(self.unit_seconds())?)?)
    }

    const fn unit_seconds(&self) -> i64 {
        match self.freq {
            Frequency::Hourly => 3_600,
            Frequency::Minutely => 60,
            _ => 1,
        }
    }

    /// Number of periods until the first one that starts on a later day.
    fn periods_to_next_day(&self, floor: NaiveDateTime) -> i64 {
        let step = self.interval * self.unit_seconds();
        let remaining = SECONDS_PER_DAY - i64::from(floor.num_seconds_from_midnight());
        (remaining + step - 1) / step
    }

    /// Times of day for DAILY and coarser frequencies.
    fn day_times(&self, seed: NaiveTime) -> Vec<NaiveTime> {
        product(
            &or_seed(&self.hours, seed.hour()),
            &or_seed(&self.minutes, seed.minute()),
            &or_seed(&self.seconds, seed.second()),
        )
    }

    /// Times within a sub-daily period. The period's own unit is a limit,
    /// finer units expand.
    fn sub_daily_times(&self, floor: NaiveDateTime, seed: NaiveTime) -> Vec<NaiveTime> {
        let hours = limit(&self.hours, floor.hour());
        let minutes = if self.freq == Frequency::Hourly {
            or_seed(&self.minutes, seed.minute())
        } else {
            limit(&self.minutes, floor.minute())
        };
        let seconds = if self.freq == Frequency::Secondly {
            limit(&self.seconds, floor.second())
        } else {
            or_seed(&self.seconds, seed.second())
        };
        product(&hours, &minutes, &seconds)
    }

    /// Keeps the BYSETPOS-selected members of a sorted period set.
    fn apply_set_pos(&self, candidates: Vec<NaiveDateTime>) -> Vec<NaiveDateTime> {
        if self.set_pos.is_empty() {
            return candidates;
        }
        let len = i64::try_from(candidates.len()).unwrap_or(i64::MAX);
        let mut selected: Vec<NaiveDateTime> = self
            .set_pos
            .iter()
            .filter_map(|&pos| {
                let index = if pos > 0 { pos - 1 } else { len + pos };
                usize::try_from(index)
                    .ok()
                    .and_then(|i| candidates.get(i).copied())
            })
            .collect();
        selected.sort_unstable();
        selected.dedup();
        selected
    }
}

/// Lazily expands a recurrence rule from a seed value.
///
/// Output is strictly increasing and carries the seed's granularity and
/// zone. The seed itself is only emitted when the rule generates it.
#[derive(Debug, Clone)]
pub struct RecurrenceIter {
    plan: Plan,
    seed: Temporal,
    start: NaiveDateTime,
    terminator: Terminator,
    limits: RecurrenceLimits,
    period: i64,
    pending: VecDeque<NaiveDateTime>,
    last: Option<NaiveDateTime>,
    emitted: u32,
    empty_periods: u32,
    finished: bool,
}

impl RecurrenceIter {
    #[must_use]
    pub fn new(rrule: &RRule, seed: Temporal, limits: RecurrenceLimits) -> Self {
        Self {
            plan: Plan::new(rrule),
            start: seed.wall_clock(),
            seed,
            terminator: rrule.terminator.clone(),
            limits,
            period: 0,
            pending: VecDeque::new(),
            last: None,
            emitted: 0,
            empty_periods: 0,
            finished: false,
        }
    }

    /// Fills `pending` from the next non-empty period, or finishes.
    fn fill(&mut self) {
        while self.pending.is_empty() && !self.finished {
            let Some(mut candidates) = self.next_candidates() else {
                self.finished = true;
                break;
            };
            candidates.sort_unstable();
            candidates.dedup();

            let start = self.start;
            let last = self.last;
            self.pending.extend(
                self.plan
                    .apply_set_pos(candidates)
                    .into_iter()
                    .filter(|c| *c >= start && last.is_none_or(|l| *c > l)),
            );

            if self.pending.is_empty() {
                self.empty_periods += 1;
                if self.empty_periods > self.limits.max_empty_periods {
                    tracing::debug!(
                        periods = self.empty_periods,
                        "Recurrence expansion stopped after consecutive empty periods"
                    );
                    self.finished = true;
                }
            } else {
                self.empty_periods = 0;
            }
        }
    }

    /// Candidates of the current period. Returns `None` once expansion
    /// runs past its bounds.
    fn next_candidates(&mut self) -> Option<Vec<NaiveDateTime>> {
        let k = self.period;
        let seed_date = self.start.date();
        let is_date = self.seed.is_date();

        if self.plan.freq >= Frequency::Daily {
            self.period = k.checked_add(1)?;
            let days = self.plan.period_days(seed_date, k)?;
            if self.beyond_bounds(*days.first()?) {
                return None;
            }
            let times = if is_date {
                vec![NaiveTime::MIN]
            } else {
                self.plan.day_times(self.start.time())
            };

            let mut candidates = Vec::new();
            for day in days {
                if self.plan.matches_date(day, seed_date) {
                    candidates.extend(times.iter().map(|t| day.and_time(*t)));
                }
            }
            return Some(candidates);
        }

        let floor = self.plan.period_floor(self.start, k)?;
        if self.beyond_bounds(floor.date()) {
            return None;
        }
        if !self.plan.matches_date(floor.date(), seed_date) {
            self.period = k.checked_add(self.plan.periods_to_next_day(floor))?;
            return Some(Vec::new());
        }
        self.period = k.checked_add(1)?;

        if is_date {
            return Some(vec![floor.date().and_time(NaiveTime::MIN)]);
        }
        Some(
            self.plan
                .sub_daily_times(floor, self.start.time())
                .into_iter()
                .map(|t| floor.date().and_time(t))
                .collect(),
        )
    }

    /// Whether a period starting on `day` lies past the year cap or UNTIL.
    fn beyond_bounds(&self, day: NaiveDate) -> bool {
        if day.year() > self.limits.max_year {
            return true;
        }
        // One day of slack covers zone offsets between wall clock and UNTIL.
        matches!(&self.terminator, Terminator::Until(until)
            if until.date_part().succ_opt().is_some_and(|limit| day > limit))
    }

    fn exceeds_until(&self, value: &Temporal) -> bool {
        match &self.terminator {
            Terminator::Until(until) if until.is_date() => value.date_part() > until.date_part(),
            Terminator::Until(until) => value.instant() > until.instant(),
            _ => false,
        }
    }
}

impl Iterator for RecurrenceIter {
    type Item = Temporal;

    fn next(&mut self) -> Option<Temporal> {
        if let Terminator::Count(count) = self.terminator
            && self.emitted >= count
        {
            return None;
        }

        self.fill();
        let wall = self.pending.pop_front()?;
        let value = self.seed.with_wall_clock(wall);
        if self.exceeds_until(&value) {
            self.finished = true;
            self.pending.clear();
            return None;
        }

        self.emitted += 1;
        self.last = Some(wall);
        Some(value)
    }
}

fn widen<T: Copy + Into<i64>>(values: &[T]) -> Vec<i64> {
    values.iter().map(|&v| v.into()).collect()
}

/// Matches `value` against positive and from-the-end (negative) positions.
fn matches_signed(positions: &[i64], value: i64, total: i64) -> bool {
    positions
        .iter()
        .any(|&n| n == value || n == value - total - 1)
}

fn or_seed(set: &[u32], seed: u32) -> Vec<u32> {
    if set.is_empty() {
        vec![seed]
    } else {
        set.to_vec()
    }
}

fn limit(set: &[u32], value: u32) -> Vec<u32> {
    if set.is_empty() || set.contains(&value) {
        vec![value]
    } else {
        Vec::new()
    }
}

/// Sorted distinct valid times from the given fields.
fn product(hours: &[u32], minutes: &[u32], seconds: &[u32]) -> Vec<NaiveTime> {
    let mut times = Vec::with_capacity(hours.len() * minutes.len() * seconds.len());
    for &h in hours {
        for &m in minutes {
            for &s in seconds {
                if let Some(time) = NaiveTime::from_hms_opt(h, m, s) {
                    times.push(time);
                }
            }
        }
    }
    times.sort_unstable();
    times.dedup();
    times
}

fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(u64::try_from(days).ok()?))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

fn days_since(day: chrono::Weekday, wkst: chrono::Weekday) -> u64 {
    u64::from((day.num_days_from_monday() + 7 - wkst.num_days_from_monday()) % 7)
}

fn month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = date.with_day(1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

fn days_in_month(date: NaiveDate) -> i64 {
    month_bounds(date).map_or(31, |(_, last)| i64::from(last.day()))
}

fn days_in_year(year: i32) -> i64 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}

/// First day of week 1: the first week starting on `wkst` that holds at
/// least four days of `year`.
fn week_one_start(year: i32, wkst: chrono::Weekday) -> Option<NaiveDate> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let offset = days_since(jan1.weekday(), wkst);
    if offset <= 3 {
        jan1.checked_sub_days(Days::new(offset))
    } else {
        jan1.checked_add_days(Days::new(7 - offset))
    }
}

/// Week-numbering year and week number of `date`.
fn week_number(date: NaiveDate, wkst: chrono::Weekday) -> Option<(i32, i64)> {
    let year = date.year();
    let this_year = week_one_start(year, wkst)?;
    let next_year = week_one_start(year + 1, wkst)?;

    let (week_year, week_one) = if date >= next_year {
        (year + 1, next_year)
    } else if date >= this_year {
        (year, this_year)
    } else {
        (year - 1, week_one_start(year - 1, wkst)?)
    };
    Some((week_year, (date - week_one).num_days() / 7 + 1))
}

fn weeks_in_year(year: i32, wkst: chrono::Weekday) -> Option<i64> {
    Some((week_one_start(year + 1, wkst)? - week_one_start(year, wkst)?).num_days() / 7)
}
