//! Shared time formatters
//!
//! `relative_time` renders "how long ago" for both the watchdog's last check
//! and a job's last run; `format_duration` renders run durations.

use chrono::{DateTime, Utc};

use crate::constants::PLACEHOLDER;
use crate::i18n;

/// Bucket the time elapsed since `past` into a localized "N units ago" phrase
///
/// Instants at or after `now` (clock skew) render as "just now".
pub fn relative_time(past: DateTime<Utc>, now: DateTime<Utc>, locale: &str) -> String {
    let table = i18n::table(locale);
    let secs = (now - past).num_milliseconds() / 1000;

    if secs <= 0 {
        table.just_now.to_string()
    } else if secs < 60 {
        table.plural(table.seconds_ago, secs)
    } else if secs < 3_600 {
        table.plural(table.minutes_ago, secs / 60)
    } else if secs < 86_400 {
        table.plural(table.hours_ago, secs / 3_600)
    } else {
        table.plural(table.days_ago, secs / 86_400)
    }
}

/// `relative_time` for optional instants, placeholder when absent
pub fn relative_time_opt(past: Option<DateTime<Utc>>, now: DateTime<Utc>, locale: &str) -> String {
    past.map(|p| relative_time(p, now, locale))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Format a run duration: "500ms", "42s", "3m 5s"
pub fn format_duration(ms: i64) -> String {
    let ms = ms.max(0);
    if ms < 1_000 {
        return format!("{}ms", ms);
    }

    let secs = ms.saturating_add(500) / 1_000;
    if secs < 60 {
        format!("{}s", secs)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Render an instant with the locale's absolute date/time pattern
pub fn format_datetime<Tz>(instant: &DateTime<Tz>, locale: &str) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    instant
        .format(i18n::table(locale).datetime_format)
        .to_string()
}
