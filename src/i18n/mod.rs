//! Locale-keyed phrase tables
//!
//! Every user-facing phrase produced by the schedule describer and the time
//! formatters comes from a `LocaleTable`. Tables are looked up by locale tag
//! (`en`, `zh-CN`, `en_US`, ...) on the primary subtag, and anything not in
//! the registry resolves to the default table.

mod tables;

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub use tables::{EN, ZH};

/// Locale used when a tag is missing or unsupported
pub const DEFAULT_LOCALE: &str = "en";

/// Phrase table for one locale
///
/// Templates use `{n}`, `{time}`, `{day}` and `{days}` placeholders.
/// Pluralized templates are `(one, other)` pairs.
#[derive(Debug)]
pub struct LocaleTable {
    pub tag: &'static str,
    /// Weekday names indexed 0 = Sunday .. 6 = Saturday
    pub weekdays: [&'static str; 7],
    pub every_minutes: &'static str,
    pub every_hours: &'static str,
    pub daily_at: &'static str,
    pub monthly_at: &'static str,
    pub weekly_at: &'static str,
    /// Separator between weekday names and between daily times
    pub list_separator: &'static str,
    /// chrono format string for absolute instants
    pub datetime_format: &'static str,
    pub just_now: &'static str,
    pub seconds_ago: (&'static str, &'static str),
    pub minutes_ago: (&'static str, &'static str),
    pub hours_ago: (&'static str, &'static str),
    pub days_ago: (&'static str, &'static str),
}

static REGISTRY: Lazy<HashMap<&'static str, &'static LocaleTable>> = Lazy::new(|| {
    [&EN, &ZH].into_iter().map(|t| (t.tag, t)).collect()
});

/// Look up the table for a locale tag, falling back to the default table
pub fn table(tag: &str) -> &'static LocaleTable {
    let primary = primary_subtag(tag);
    REGISTRY
        .get(primary.as_str())
        .copied()
        .unwrap_or(&EN)
}

/// Normalize a tag to the registry key form actually used (e.g. "zh-TW" -> "zh")
pub fn resolve(tag: &str) -> &'static str {
    table(tag).tag
}

/// Tags with a registered table
pub fn supported_locales() -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = REGISTRY.keys().copied().collect();
    tags.sort_unstable();
    tags
}

fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

impl LocaleTable {
    /// Localized weekday name, or `None` for indices outside 0..=6
    pub fn weekday(&self, index: &str) -> Option<&'static str> {
        index
            .parse::<usize>()
            .ok()
            .and_then(|i| self.weekdays.get(i).copied())
    }

    /// Pick the singular or plural template and fill in `{n}`
    pub fn plural(&self, forms: (&'static str, &'static str), n: i64) -> String {
        let template = if n == 1 { forms.0 } else { forms.1 };
        template.replace("{n}", &n.to_string())
    }
}
