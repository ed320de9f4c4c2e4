//! iCalendar RRULE (Recurrence Rule) value type (RFC 5545 §3.3.10, §3.8.5.3).

use std::fmt;

use super::Temporal;

/// Recurrence frequency (RFC 5545 §3.3.10).
///
/// Variants are declared from the finest to the coarsest unit so the derived
/// ordering compares period lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Self::Secondly,
            "MINUTELY" => Self::Minutely,
            "HOURLY" => Self::Hourly,
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Parses a weekday from a two-letter abbreviation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SU" => Self::Sunday,
            "MO" => Self::Monday,
            "TU" => Self::Tuesday,
            "WE" => Self::Wednesday,
            "TH" => Self::Thursday,
            "FR" => Self::Friday,
            "SA" => Self::Saturday,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn to_chrono(self) -> chrono::Weekday {
        match self {
            Self::Sunday => chrono::Weekday::Sun,
            Self::Monday => chrono::Weekday::Mon,
            Self::Tuesday => chrono::Weekday::Tue,
            Self::Wednesday => chrono::Weekday::Wed,
            Self::Thursday => chrono::Weekday::Thu,
            Self::Friday => chrono::Weekday::Fri,
            Self::Saturday => chrono::Weekday::Sat,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weekday with optional occurrence number, as used in BYDAY.
///
/// - `MO` - every Monday
/// - `1MO` - first Monday of the month/year
/// - `-1FR` - last Friday of the month/year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayNum {
    /// Occurrence number (-53 to 53, excluding 0). Out-of-range values are
    /// reported by validation, not rejected here.
    pub ordinal: Option<i8>,
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// Every occurrence of `weekday` within the period.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    /// The `ordinal`-th occurrence of `weekday`, counted from the end when negative.
    #[must_use]
    pub const fn nth(ordinal: i8, weekday: Weekday) -> Self {
        Self {
            ordinal: Some(ordinal),
            weekday,
        }
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.ordinal {
            write!(f, "{n}")?;
        }
        write!(f, "{}", self.weekday)
    }
}

/// How a recurrence ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Terminator {
    #[default]
    Unbounded,
    Count(u32),
    /// Inclusive boundary.
    Until(Temporal),
}

/// Kinds of BY-rule parts, in the order they are applied during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ByRuleKind {
    Month,
    WeekNo,
    YearDay,
    MonthDay,
    Day,
    Hour,
    Minute,
    Second,
    SetPos,
    WeekStart,
}

impl ByRuleKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "BYMONTH",
            Self::WeekNo => "BYWEEKNO",
            Self::YearDay => "BYYEARDAY",
            Self::MonthDay => "BYMONTHDAY",
            Self::Day => "BYDAY",
            Self::Hour => "BYHOUR",
            Self::Minute => "BYMINUTE",
            Self::Second => "BYSECOND",
            Self::SetPos => "BYSETPOS",
            Self::WeekStart => "WKST",
        }
    }
}

/// A single BY-rule part with its values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ByRule {
    Month(Vec<u8>),
    WeekNo(Vec<i8>),
    YearDay(Vec<i16>),
    MonthDay(Vec<i8>),
    Day(Vec<WeekdayNum>),
    Hour(Vec<u8>),
    Minute(Vec<u8>),
    Second(Vec<u8>),
    SetPos(Vec<i16>),
    WeekStart(Weekday),
}

impl ByRule {
    #[must_use]
    pub const fn kind(&self) -> ByRuleKind {
        match self {
            Self::Month(_) => ByRuleKind::Month,
            Self::WeekNo(_) => ByRuleKind::WeekNo,
            Self::YearDay(_) => ByRuleKind::YearDay,
            Self::MonthDay(_) => ByRuleKind::MonthDay,
            Self::Day(_) => ByRuleKind::Day,
            Self::Hour(_) => ByRuleKind::Hour,
            Self::Minute(_) => ByRuleKind::Minute,
            Self::Second(_) => ByRuleKind::Second,
            Self::SetPos(_) => ByRuleKind::SetPos,
            Self::WeekStart(_) => ByRuleKind::WeekStart,
        }
    }
}

fn join<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for ByRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = match self {
            Self::Month(v) | Self::Hour(v) | Self::Minute(v) | Self::Second(v) => join(v),
            Self::WeekNo(v) | Self::MonthDay(v) => join(v),
            Self::YearDay(v) | Self::SetPos(v) => join(v),
            Self::Day(v) => join(v),
            Self::WeekStart(wd) => wd.to_string(),
        };
        write!(f, "{}={values}", self.kind().as_str())
    }
}

/// One `KEY=VALUE` part of a rule, used to remember textual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RulePart {
    Freq,
    Interval,
    Terminator,
    By(ByRuleKind),
}

/// Recurrence rule (RFC 5545 §3.3.10, §3.8.5.3).
///
/// Equality treats the BY-rules as a set. The order parts were parsed in is
/// kept only for serialization.
#[derive(Debug, Clone)]
pub struct RRule {
    pub freq: Frequency,
    /// Recurrence interval; `None` means the default of 1.
    pub interval: Option<u32>,
    pub terminator: Terminator,
    by_rules: Vec<ByRule>,
    layout: Vec<RulePart>,
}

impl RRule {
    #[must_use]
    pub const fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: None,
            terminator: Terminator::Unbounded,
            by_rules: Vec::new(),
            layout: Vec::new(),
        }
    }

    #[must_use]
    pub const fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    #[must_use]
    pub const fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    #[must_use]
    pub const fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    #[must_use]
    pub const fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    /// Effective interval (default 1).
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval.unwrap_or(1)
    }

    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        match self.terminator {
            Terminator::Count(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn until(&self) -> Option<&Temporal> {
        match &self.terminator {
            Terminator::Until(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.terminator = Terminator::Count(count);
        self
    }

    #[must_use]
    pub fn with_until(mut self, until: Temporal) -> Self {
        self.terminator = Terminator::Until(until);
        self
    }

    /// Adds a BY-rule, replacing any existing rule of the same kind in place.
    #[must_use]
    pub fn with_by_rule(mut self, rule: ByRule) -> Self {
        self.set_by_rule(rule);
        self
    }

    #[must_use]
    pub fn with_by_day(self, days: Vec<WeekdayNum>) -> Self {
        self.with_by_rule(ByRule::Day(days))
    }

    #[must_use]
    pub fn with_by_month(self, months: Vec<u8>) -> Self {
        self.with_by_rule(ByRule::Month(months))
    }

    #[must_use]
    pub fn with_by_month_day(self, days: Vec<i8>) -> Self {
        self.with_by_rule(ByRule::MonthDay(days))
    }

    #[must_use]
    pub fn with_by_set_pos(self, positions: Vec<i16>) -> Self {
        self.with_by_rule(ByRule::SetPos(positions))
    }

    #[must_use]
    pub fn with_wkst(self, wkst: Weekday) -> Self {
        self.with_by_rule(ByRule::WeekStart(wkst))
    }

    /// Sets a BY-rule. Returns the rule it replaced, if any.
    pub fn set_by_rule(&mut self, rule: ByRule) -> Option<ByRule> {
        let kind = rule.kind();
        if let Some(existing) = self.by_rules.iter_mut().find(|r| r.kind() == kind) {
            return Some(std::mem::replace(existing, rule));
        }
        self.by_rules.push(rule);
        None
    }

    pub fn remove_by_rule(&mut self, kind: ByRuleKind) -> Option<ByRule> {
        let index = self.by_rules.iter().position(|r| r.kind() == kind)?;
        Some(self.by_rules.remove(index))
    }

    #[must_use]
    pub fn by_rules(&self) -> &[ByRule] {
        &self.by_rules
    }

    #[must_use]
    pub fn by_rule(&self, kind: ByRuleKind) -> Option<&ByRule> {
        self.by_rules.iter().find(|r| r.kind() == kind)
    }

    #[must_use]
    pub fn has(&self, kind: ByRuleKind) -> bool {
        self.by_rule(kind).is_some()
    }

    #[must_use]
    pub fn by_month(&self) -> &[u8] {
        match self.by_rule(ByRuleKind::Month) {
            Some(ByRule::Month(v)) => v,
            _ => &[],
        }
    }

    #[must_use]
    pub fn by_week_no(&self) -> &[i8] {
        match self.by_rule(ByRuleKind::WeekNo) {
            Some(ByRule::WeekNo(v)) => v,
            _ => &[],
        }
    }

    #[must_use]
    pub fn by_year_day(&self) -> &[i16] {
        match self.by_rule(ByRuleKind::YearDay) {
            Some(ByRule::YearDay(v)) => v,
            _ => &[],
        }
    }

    #[must_use]
    pub fn by_month_day(&self) -> &[i8] {
        match self.by_rule(ByRuleKind::MonthDay) {
            Some(ByRule::MonthDay(v)) => v,
            _ => &[],
        }
    }

    #[must_use]
    pub fn by_day(&self) -> &[WeekdayNum] {
        match self.by_rule(ByRuleKind::Day) {
            Some(ByRule::Day(v)) => v,
            _ => &[],
        }
    }

    #[must_use]
    pub fn by_hour(&self) -> &[u8] {
        match self.by_rule(ByRuleKind::Hour) {
            Some(ByRule::Hour(v)) => v,
            _ => &[],
        }
    }

    #[must_use]
    pub fn by_minute(&self) -> &[u8] {
        match self.by_rule(ByRuleKind::Minute) {
            Some(ByRule::Minute(v)) => v,
            _ => &[],
        }
    }

    #[must_use]
    pub fn by_second(&self) -> &[u8] {
        match self.by_rule(ByRuleKind::Second) {
            Some(ByRule::Second(v)) => v,
            _ => &[],
        }
    }

    #[must_use]
    pub fn by_set_pos(&self) -> &[i16] {
        match self.by_rule(ByRuleKind::SetPos) {
            Some(ByRule::SetPos(v)) => v,
            _ => &[],
        }
    }

    /// Week start (default Monday).
    #[must_use]
    pub fn wkst(&self) -> Weekday {
        match self.by_rule(ByRuleKind::WeekStart) {
            Some(ByRule::WeekStart(wd)) => *wd,
            _ => Weekday::Monday,
        }
    }

    /// Records that `part` appeared next in the source text.
    pub(crate) fn record_part(&mut self, part: RulePart) {
        if !self.layout.contains(&part) {
            self.layout.push(part);
        }
    }

    /// Validation messages for this rule against the component's start value.
    #[must_use]
    pub fn errors(&self, dtstart: Option<&Temporal>) -> Vec<String> {
        crate::rfc::ical::validation::validate_rrule(self, dtstart)
    }

    fn write_part(&self, part: RulePart, out: &mut Vec<String>) {
        match part {
            RulePart::Freq => out.push(format!("FREQ={}", self.freq)),
            RulePart::Interval => {
                if let Some(interval) = self.interval {
                    out.push(format!("INTERVAL={interval}"));
                }
            }
            RulePart::Terminator => match &self.terminator {
                Terminator::Count(n) => out.push(format!("COUNT={n}")),
                Terminator::Until(t) => out.push(format!("UNTIL={t}")),
                Terminator::Unbounded => {}
            },
            RulePart::By(kind) => {
                if let Some(rule) = self.by_rule(kind) {
                    out.push(rule.to_string());
                }
            }
        }
    }

    fn sorted_by_rules(&self) -> Vec<&ByRule> {
        let mut rules: Vec<&ByRule> = self.by_rules.iter().collect();
        rules.sort_by_key(|r| r.kind());
        rules
    }
}

impl PartialEq for RRule {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq
            && self.interval() == other.interval()
            && self.terminator == other.terminator
            && self.sorted_by_rules() == other.sorted_by_rules()
    }
}

impl Eq for RRule {}

impl fmt::Display for RRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for part in &self.layout {
            self.write_part(*part, &mut parts);
        }

        let mut remaining = vec![RulePart::Freq, RulePart::Interval, RulePart::Terminator];
        remaining.extend(self.by_rules.iter().map(|r| RulePart::By(r.kind())));
        for part in remaining {
            if !self.layout.contains(&part) {
                self.write_part(part, &mut parts);
            }
        }

        write!(f, "{}", parts.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rrule_display_basic() {
        let rrule = RRule::daily().with_count(10);
        assert_eq!(rrule.to_string(), "FREQ=DAILY;COUNT=10");
    }

    #[test]
    fn rrule_display_weekly_byday() {
        let rrule = RRule::weekly().with_by_day(vec![
            WeekdayNum::every(Weekday::Monday),
            WeekdayNum::every(Weekday::Wednesday),
            WeekdayNum::every(Weekday::Friday),
        ]);
        assert_eq!(rrule.to_string(), "FREQ=WEEKLY;BYDAY=MO,WE,FR");
    }

    #[test]
    fn rrule_display_monthly_nth() {
        let rrule = RRule::monthly().with_by_day(vec![WeekdayNum::nth(-1, Weekday::Friday)]);
        assert_eq!(rrule.to_string(), "FREQ=MONTHLY;BYDAY=-1FR");
    }

    #[test]
    fn rrule_display_with_interval_and_until() {
        let rrule = RRule::weekly()
            .with_interval(2)
            .with_until(Temporal::utc(1997, 12, 24, 0, 0, 0).unwrap());
        assert_eq!(
            rrule.to_string(),
            "FREQ=WEEKLY;INTERVAL=2;UNTIL=19971224T000000Z"
        );
    }

    #[test]
    fn by_rule_replaces_same_kind() {
        let mut rrule = RRule::monthly().with_by_month_day(vec![1]);
        let replaced = rrule.set_by_rule(ByRule::MonthDay(vec![13]));
        assert_eq!(replaced, Some(ByRule::MonthDay(vec![1])));
        assert_eq!(rrule.by_rules().len(), 1);
        assert_eq!(rrule.by_month_day(), &[13]);
    }

    #[test]
    fn equality_ignores_by_rule_order() {
        let a = RRule::monthly()
            .with_by_day(vec![WeekdayNum::every(Weekday::Friday)])
            .with_by_month_day(vec![13]);
        let b = RRule::monthly()
            .with_by_month_day(vec![13])
            .with_by_day(vec![WeekdayNum::every(Weekday::Friday)]);
        assert_eq!(a, b);
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn default_interval_equals_explicit_one() {
        assert_eq!(RRule::daily(), RRule::daily().with_interval(1));
    }

    #[test]
    fn wkst_defaults_to_monday() {
        assert_eq!(RRule::weekly().wkst(), Weekday::Monday);
        assert_eq!(
            RRule::weekly().with_wkst(Weekday::Sunday).wkst(),
            Weekday::Sunday
        );
    }

    #[test]
    fn weekday_parse() {
        assert_eq!(Weekday::parse("MO"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("fr"), Some(Weekday::Friday));
        assert_eq!(Weekday::parse("XX"), None);
    }

    #[test]
    fn frequency_parse_and_order() {
        assert_eq!(Frequency::parse("DAILY"), Some(Frequency::Daily));
        assert_eq!(Frequency::parse("weekly"), Some(Frequency::Weekly));
        assert_eq!(Frequency::parse("INVALID"), None);
        assert!(Frequency::Secondly < Frequency::Yearly);
    }
}
