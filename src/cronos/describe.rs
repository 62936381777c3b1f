//! cronos/describe.rs
//!
//! Human-readable schedule text and next-run previews.
//!
//! Entry points:
//! - `describe()` - Phrase for any schedule kind
//! - `next_runs()` - Upcoming fire times
//! - `validate_cron()` - Parse check for cron expressions

use chrono::{DateTime, Duration, Utc};
use cron::Schedule;
use regex::Captures;
use std::str::FromStr;

use super::humanize::humanize;
use super::types::{ScheduleDescription, ScheduleSpec};
use crate::constants::{MAX_NEXT_RUNS, PLACEHOLDER, RE_DIGITS};
use crate::error::AppError;
use crate::i18n;
use crate::utils::format::format_datetime;
use crate::utils::timestamp::parse_timestamp;

// === DESCRIPTIONS ===

/// Describe a schedule; a missing schedule renders as the placeholder
pub fn describe(spec: Option<&ScheduleSpec>, locale: &str) -> String {
    match spec {
        None => PLACEHOLDER.to_string(),
        Some(ScheduleSpec::Every { every_ms }) => describe_every(*every_ms, locale),
        Some(ScheduleSpec::At { at }) => describe_at(at, locale),
        Some(ScheduleSpec::Cron { expr, .. }) => humanize(expr, locale),
    }
}

/// "every Nm" below an hour, "every Nh" from an hour up
///
/// Both steps round half-up, so 90s is "every 2m" and 90m is "every 2h".
pub fn describe_every(every_ms: u64, locale: &str) -> String {
    let table = i18n::table(locale);
    let minutes = every_ms.saturating_add(30_000) / 60_000;
    if minutes >= 60 {
        let hours = (minutes + 30) / 60;
        table.every_hours.replace("{n}", &hours.to_string())
    } else {
        table.every_minutes.replace("{n}", &minutes.to_string())
    }
}

/// Absolute date/time in the timestamp's own offset
///
/// Offset-less ISO strings are shown as UTC. Unparseable input is returned as-is.
pub fn describe_at(at: &str, locale: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(at.trim()) {
        return format_datetime(&dt, locale);
    }
    match parse_timestamp(at) {
        Some(dt) => format_datetime(&dt, locale),
        None => at.to_string(),
    }
}

/// Phrase plus next-run preview, for the schedule editor
pub fn describe_schedule(
    spec: &ScheduleSpec,
    now: DateTime<Utc>,
    locale: &str,
    count: usize,
) -> ScheduleDescription {
    ScheduleDescription {
        text: describe(Some(spec), locale),
        next_runs: next_runs(spec, now, count)
            .into_iter()
            .map(|dt| dt.to_rfc3339())
            .collect(),
    }
}

// === NEXT RUNS ===

/// Up to `count` (capped at 10) fire times strictly after `after`
///
/// Cron schedules are evaluated in UTC. Expressions the cron parser rejects
/// yield no runs.
pub fn next_runs(spec: &ScheduleSpec, after: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    let count = count.min(MAX_NEXT_RUNS);
    match spec {
        ScheduleSpec::Every { every_ms } => every_runs(*every_ms, after, count),
        ScheduleSpec::At { at } => parse_timestamp(at)
            .filter(|dt| *dt > after)
            .into_iter()
            .take(count)
            .collect(),
        ScheduleSpec::Cron { expr, .. } => match parse_schedule(expr) {
            Ok(schedule) => schedule.after(&after).take(count).collect(),
            Err(_) => Vec::new(),
        },
    }
}

/// First upcoming fire time, RFC 3339
pub fn next_run(spec: &ScheduleSpec, after: DateTime<Utc>) -> Option<String> {
    next_runs(spec, after, 1)
        .into_iter()
        .next()
        .map(|dt| dt.to_rfc3339())
}

fn every_runs(every_ms: u64, after: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    let Ok(step_ms) = i64::try_from(every_ms) else {
        return Vec::new();
    };
    if step_ms == 0 {
        return Vec::new();
    }
    let step = Duration::milliseconds(step_ms);

    let mut runs = Vec::with_capacity(count);
    let mut current = after;
    while runs.len() < count {
        match current.checked_add_signed(step) {
            Some(next) => {
                runs.push(next);
                current = next;
            }
            None => break,
        }
    }
    runs
}

// === CRON PARSING ===

pub fn validate_cron(expression: &str) -> Result<(), AppError> {
    parse_schedule(expression).map(|_| ())
}

fn parse_schedule(expression: &str) -> Result<Schedule, AppError> {
    let expr = to_schedule_expr(expression).ok_or_else(|| {
        AppError::invalid_params(format!(
            "Invalid cron expression '{}': expected 5 fields",
            expression
        ))
    })?;

    Schedule::from_str(&expr).map_err(|e| {
        AppError::invalid_params(format!("Invalid cron expression '{}': {}", expression, e))
    })
}

/// Convert a 5-field expression to the seconds-first form of the `cron` crate
///
/// That crate numbers weekdays 1 = Sunday .. 7 = Saturday, so numeric
/// day-of-week values are shifted from the 0 = Sunday convention (7 also
/// means Sunday). 6- and 7-field expressions pass through unchanged.
fn to_schedule_expr(expression: &str) -> Option<String> {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    match fields.len() {
        5 => Some(format!(
            "0 {} {} {} {} {}",
            fields[0],
            fields[1],
            fields[2],
            fields[3],
            shift_day_of_week(fields[4])
        )),
        6 | 7 => Some(fields.join(" ")),
        _ => None,
    }
}

fn shift_day_of_week(field: &str) -> String {
    field
        .split(',')
        .map(|item| {
            let (range, step) = match item.split_once('/') {
                Some((range, step)) => (range, Some(step)),
                None => (item, None),
            };
            let shifted = RE_DIGITS.replace_all(range, |caps: &Captures| {
                let day: u64 = caps[0].parse().unwrap_or(0);
                ((day % 7) + 1).to_string()
            });
            match step {
                Some(step) => format!("{}/{}", shifted, step),
                None => shifted.into_owned(),
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike, Weekday};

    fn now() -> DateTime<Utc> {
        // Sunday
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_describe_missing_schedule() {
        assert_eq!(describe(None, "en"), "—");
    }

    #[test]
    fn test_describe_every_minutes_and_hours() {
        assert_eq!(describe_every(60_000, "en"), "every 1m");
        assert_eq!(describe_every(300_000, "en"), "every 5m");
        assert_eq!(describe_every(3_540_000, "en"), "every 59m");
        assert_eq!(describe_every(3_600_000, "en"), "every 1h");
        assert_eq!(describe_every(7_200_000, "zh"), "每 2 小时");
    }

    #[test]
    fn test_describe_every_rounds_half_up() {
        assert_eq!(describe_every(89_000, "en"), "every 1m");
        assert_eq!(describe_every(90_000, "en"), "every 2m");
        // 59.5 minutes rounds to 60, which is then shown in hours
        assert_eq!(describe_every(3_570_000, "en"), "every 1h");
        // 90 minutes rounds up to 2 hours
        assert_eq!(describe_every(5_400_000, "en"), "every 2h");
        assert_eq!(describe_every(5_340_000, "en"), "every 1h");
    }

    #[test]
    fn test_describe_every_sub_half_minute() {
        assert_eq!(describe_every(20_000, "en"), "every 0m");
    }

    #[test]
    fn test_describe_at_keeps_offset() {
        let spec = ScheduleSpec::At { at: "2026-03-09T07:05:00+08:00".to_string() };
        assert_eq!(describe(Some(&spec), "en"), "Mar 9, 2026 07:05");
        assert_eq!(describe(Some(&spec), "zh"), "2026年3月9日 07:05");
    }

    #[test]
    fn test_describe_at_without_offset_is_localized() {
        let spec = ScheduleSpec::At { at: "2026-03-09T07:05:00".to_string() };
        assert_eq!(describe(Some(&spec), "en"), "Mar 9, 2026 07:05");
        assert_eq!(describe(Some(&spec), "zh"), "2026年3月9日 07:05");
    }

    #[test]
    fn test_describe_at_unparseable_is_verbatim() {
        let spec = ScheduleSpec::At { at: "next tuesday".to_string() };
        assert_eq!(describe(Some(&spec), "en"), "next tuesday");
    }

    #[test]
    fn test_describe_cron_delegates_to_humanizer() {
        let spec = ScheduleSpec::Cron { expr: "0 9 * * 1,3".to_string(), tz: None };
        assert_eq!(describe(Some(&spec), "en"), "Mon, Wed 09:00");

        let raw = ScheduleSpec::Cron { expr: "0 9-17 * * *".to_string(), tz: None };
        assert_eq!(describe(Some(&raw), "en"), "0 9-17 * * *");
    }

    #[test]
    fn test_next_runs_every() {
        let spec = ScheduleSpec::Every { every_ms: 900_000 };
        let runs = next_runs(&spec, now(), 3);
        assert_eq!(
            runs,
            vec![
                now() + Duration::minutes(15),
                now() + Duration::minutes(30),
                now() + Duration::minutes(45),
            ]
        );
    }

    #[test]
    fn test_next_runs_every_zero_is_empty() {
        assert!(next_runs(&ScheduleSpec::Every { every_ms: 0 }, now(), 5).is_empty());
    }

    #[test]
    fn test_next_runs_at_only_when_future() {
        let future = ScheduleSpec::At { at: "2026-03-02T00:00:00Z".to_string() };
        assert_eq!(next_runs(&future, now(), 5).len(), 1);

        let past = ScheduleSpec::At { at: "2026-02-01T00:00:00Z".to_string() };
        assert!(next_runs(&past, now(), 5).is_empty());
    }

    #[test]
    fn test_next_runs_cron_daily() {
        let spec = ScheduleSpec::Cron { expr: "30 14 * * *".to_string(), tz: None };
        let runs = next_runs(&spec, now(), 2);
        assert_eq!(runs[0], Utc.with_ymd_and_hms(2026, 3, 1, 14, 30, 0).unwrap());
        assert_eq!(runs[1], Utc.with_ymd_and_hms(2026, 3, 2, 14, 30, 0).unwrap());
    }

    #[test]
    fn test_next_runs_cron_weekday_numbering() {
        // 1 is Monday in 5-field cron
        let spec = ScheduleSpec::Cron { expr: "0 9 * * 1".to_string(), tz: None };
        let runs = next_runs(&spec, now(), 2);
        assert_eq!(runs.len(), 2);
        for run in runs {
            assert_eq!(run.weekday(), Weekday::Mon);
            assert_eq!(run.hour(), 9);
        }

        let sunday = ScheduleSpec::Cron { expr: "0 9 * * 0".to_string(), tz: None };
        assert_eq!(next_runs(&sunday, now(), 1)[0].weekday(), Weekday::Sun);
    }

    #[test]
    fn test_next_runs_capped() {
        let spec = ScheduleSpec::Cron { expr: "*/5 * * * *".to_string(), tz: None };
        assert_eq!(next_runs(&spec, now(), 50).len(), MAX_NEXT_RUNS);
    }

    #[test]
    fn test_next_runs_invalid_cron_is_empty() {
        let spec = ScheduleSpec::Cron { expr: "61 * * * *".to_string(), tz: None };
        assert!(next_runs(&spec, now(), 3).is_empty());
        assert!(next_run(&spec, now()).is_none());
    }

    #[test]
    fn test_validate_cron() {
        assert!(validate_cron("0 9 * * 1-5").is_ok());
        assert!(validate_cron("0 0 9 * * 2").is_ok());
        assert!(validate_cron("0 9 * *").is_err());
        assert!(validate_cron("99 * * * *").is_err());
    }

    #[test]
    fn test_shift_day_of_week() {
        assert_eq!(shift_day_of_week("0"), "1");
        assert_eq!(shift_day_of_week("1-5"), "2-6");
        assert_eq!(shift_day_of_week("1,3,7"), "2,4,1");
        assert_eq!(shift_day_of_week("*/2"), "*/2");
        assert_eq!(shift_day_of_week("1-5/2"), "2-6/2");
        assert_eq!(shift_day_of_week("MON"), "MON");
    }

    #[test]
    fn test_describe_schedule_bundles_text_and_runs() {
        let spec = ScheduleSpec::Every { every_ms: 3_600_000 };
        let desc = describe_schedule(&spec, now(), "en", 2);
        assert_eq!(desc.text, "every 1h");
        assert_eq!(desc.next_runs.len(), 2);
        assert!(desc.next_runs[0].starts_with("2026-03-01T13:00:00"));
    }
}
