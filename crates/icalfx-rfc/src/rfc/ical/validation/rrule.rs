//! Recurrence rule checks (RFC 5545 §3.3.10).

use crate::rfc::ical::core::{ByRuleKind, DateTimeType, Frequency, RRule, Temporal};

/// ## Summary
/// Validates a recurrence rule against the start value of its component.
///
/// Reports frequency/BY-rule incompatibilities, out-of-range values, a zero
/// INTERVAL, BYSETPOS without another BY-rule, an UNTIL whose type does not
/// fit DTSTART, and time BY-rules on DATE starts.
#[must_use]
pub fn validate_rrule(rrule: &RRule, dtstart: Option<&Temporal>) -> Vec<String> {
    let mut errors = Vec::new();
    let freq = rrule.freq;

    if rrule.interval() == 0 {
        errors.push("INTERVAL must be positive".to_string());
    }

    check_compatibility(rrule, &mut errors);
    check_ranges(rrule, &mut errors);

    let selects = rrule
        .by_rules()
        .iter()
        .any(|r| !matches!(r.kind(), ByRuleKind::SetPos | ByRuleKind::WeekStart));
    if rrule.has(ByRuleKind::SetPos) && !selects {
        errors.push("BYSETPOS requires another BY-rule".to_string());
    }

    if let Some(start) = dtstart {
        check_until(rrule, start, &mut errors);

        if start.is_date() {
            for kind in [ByRuleKind::Hour, ByRuleKind::Minute, ByRuleKind::Second] {
                if rrule.has(kind) {
                    errors.push(format!("{} is ignored for a DATE start", kind.as_str()));
                }
            }
            if freq < Frequency::Daily {
                errors.push(format!("FREQ={freq} requires a DATE-TIME start"));
            }
        }
    }

    errors
}

fn check_compatibility(rrule: &RRule, errors: &mut Vec<String>) {
    let freq = rrule.freq;

    if rrule.has(ByRuleKind::WeekNo) && freq != Frequency::Yearly {
        errors.push(format!("BYWEEKNO is not valid with FREQ={freq}"));
    }
    if rrule.has(ByRuleKind::YearDay)
        && matches!(
            freq,
            Frequency::Daily | Frequency::Weekly | Frequency::Monthly
        )
    {
        errors.push(format!("BYYEARDAY is not valid with FREQ={freq}"));
    }
    if rrule.has(ByRuleKind::MonthDay) && freq == Frequency::Weekly {
        errors.push(format!("BYMONTHDAY is not valid with FREQ={freq}"));
    }

    let numeric_by_day = rrule.by_day().iter().any(|d| d.ordinal.is_some());
    if numeric_by_day {
        if !matches!(freq, Frequency::Monthly | Frequency::Yearly) {
            errors.push(format!("numeric BYDAY is not valid with FREQ={freq}"));
        } else if freq == Frequency::Yearly && rrule.has(ByRuleKind::WeekNo) {
            errors.push("numeric BYDAY is not valid together with BYWEEKNO".to_string());
        }
    }
}

fn check_ranges(rrule: &RRule, errors: &mut Vec<String>) {
    let mut out_of_range = |kind: ByRuleKind, value: i64| {
        errors.push(format!("{} value {value} is out of range", kind.as_str()));
    };

    for &v in rrule.by_month() {
        if !(1..=12).contains(&v) {
            out_of_range(ByRuleKind::Month, i64::from(v));
        }
    }
    for &v in rrule.by_week_no() {
        if v == 0 || !(-53..=53).contains(&v) {
            out_of_range(ByRuleKind::WeekNo, i64::from(v));
        }
    }
    for &v in rrule.by_year_day() {
        if v == 0 || !(-366..=366).contains(&v) {
            out_of_range(ByRuleKind::YearDay, i64::from(v));
        }
    }
    for &v in rrule.by_month_day() {
        if v == 0 || !(-31..=31).contains(&v) {
            out_of_range(ByRuleKind::MonthDay, i64::from(v));
        }
    }
    for day in rrule.by_day() {
        if let Some(n) = day.ordinal
            && (n == 0 || !(-53..=53).contains(&n))
        {
            out_of_range(ByRuleKind::Day, i64::from(n));
        }
    }
    for &v in rrule.by_hour() {
        if v > 23 {
            out_of_range(ByRuleKind::Hour, i64::from(v));
        }
    }
    for &v in rrule.by_minute() {
        if v > 59 {
            out_of_range(ByRuleKind::Minute, i64::from(v));
        }
    }
    for &v in rrule.by_second() {
        if v > 60 {
            out_of_range(ByRuleKind::Second, i64::from(v));
        }
    }
    for &v in rrule.by_set_pos() {
        if v == 0 || !(-366..=366).contains(&v) {
            out_of_range(ByRuleKind::SetPos, i64::from(v));
        }
    }
}

/// UNTIL must be a DATE for DATE starts, floating for floating starts, and
/// UTC for zoned or UTC starts.
fn check_until(rrule: &RRule, start: &Temporal, errors: &mut Vec<String>) {
    let Some(until) = rrule.until() else {
        return;
    };

    let expected = match start.date_time_type() {
        DateTimeType::Date => DateTimeType::Date,
        DateTimeType::DateWithLocalTime => DateTimeType::DateWithLocalTime,
        DateTimeType::DateWithLocalTimeAndTimeZone | DateTimeType::DateWithUtcTime => {
            DateTimeType::DateWithUtcTime
        }
    };
    if until.date_time_type() != expected {
        errors.push(format!(
            "UNTIL has type {}, expected {expected} for a {} start",
            until.date_time_type(),
            start.date_time_type()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{Weekday, WeekdayNum};
    use crate::rfc::ical::parse::parse_rrule;

    fn errors(rule: &str, start: &Temporal) -> Vec<String> {
        validate_rrule(&parse_rrule(rule, 1, 1).unwrap(), Some(start))
    }

    fn local() -> Temporal {
        Temporal::local(2026, 1, 5, 9, 0, 0).unwrap()
    }

    #[test]
    fn plain_rules_are_valid() {
        assert!(errors("FREQ=DAILY", &local()).is_empty());
        assert!(errors("FREQ=YEARLY;BYWEEKNO=20;BYDAY=MO", &local()).is_empty());
        assert!(errors("FREQ=MONTHLY;BYDAY=-1FR;BYSETPOS=1", &local()).is_empty());
    }

    #[test]
    fn incompatible_rules() {
        assert_eq!(
            errors("FREQ=MONTHLY;BYWEEKNO=3", &local()),
            vec!["BYWEEKNO is not valid with FREQ=MONTHLY"]
        );
        assert_eq!(
            errors("FREQ=WEEKLY;BYMONTHDAY=3", &local()),
            vec!["BYMONTHDAY is not valid with FREQ=WEEKLY"]
        );
        assert_eq!(
            errors("FREQ=DAILY;BYYEARDAY=100", &local()),
            vec!["BYYEARDAY is not valid with FREQ=DAILY"]
        );
        assert_eq!(
            errors("FREQ=WEEKLY;BYDAY=1MO", &local()),
            vec!["numeric BYDAY is not valid with FREQ=WEEKLY"]
        );
    }

    #[test]
    fn out_of_range_values() {
        assert_eq!(
            errors("FREQ=YEARLY;BYMONTH=13;BYHOUR=24", &local()),
            vec![
                "BYMONTH value 13 is out of range",
                "BYHOUR value 24 is out of range"
            ]
        );
    }

    #[test]
    fn set_pos_needs_company() {
        assert_eq!(
            errors("FREQ=MONTHLY;BYSETPOS=1", &local()),
            vec!["BYSETPOS requires another BY-rule"]
        );
    }

    #[test]
    fn until_type_must_fit_start() {
        let zoned = Temporal::zoned(2026, 1, 5, 9, 0, 0, "Europe/Paris").unwrap();
        assert!(errors("FREQ=DAILY;UNTIL=20260201T000000Z", &zoned).is_empty());
        assert_eq!(
            errors("FREQ=DAILY;UNTIL=20260201", &zoned),
            vec![
                "UNTIL has type DATE, expected DATE_WITH_UTC_TIME for a DATE_WITH_LOCAL_TIME_AND_TIME_ZONE start"
            ]
        );
    }

    #[test]
    fn time_rules_on_date_start() {
        let rrule = RRule::daily().with_by_rule(crate::rfc::ical::core::ByRule::Hour(vec![9]));
        assert_eq!(
            validate_rrule(&rrule, Temporal::date(2026, 1, 1).as_ref()),
            vec!["BYHOUR is ignored for a DATE start"]
        );
    }

    #[test]
    fn builder_rules_validate_too() {
        let rrule = RRule::monthly().with_by_day(vec![WeekdayNum::nth(0, Weekday::Monday)]);
        assert_eq!(
            validate_rrule(&rrule, None),
            vec!["BYDAY value 0 is out of range"]
        );
    }
}
