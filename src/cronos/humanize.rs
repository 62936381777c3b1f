//! cronos/humanize.rs
//!
//! Turns the small vocabulary of cron expressions the platform generates
//! (periodic minute/hour steps, daily, weekly and monthly jobs) into short
//! localized phrases. Anything outside that vocabulary, and anything that is
//! not exactly five fields, is returned unchanged.

use crate::constants::{RE_CRON_NUMERAL, RE_CRON_NUMERAL_LIST, RE_CRON_STEP};
use crate::i18n::{self, LocaleTable};

/// One whitespace-separated field of a cron expression
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CronField<'a> {
    raw: &'a str,
}

impl<'a> CronField<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn is_any(&self) -> bool {
        self.raw == "*"
    }

    /// Interval of a `*/N` field
    pub fn step(&self) -> Option<&'a str> {
        RE_CRON_STEP
            .captures(self.raw)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Any `/` at all, including `5/10` and `1-30/5`
    pub fn has_step(&self) -> bool {
        self.raw.contains('/')
    }

    pub fn numeral(&self) -> Option<&'a str> {
        RE_CRON_NUMERAL.is_match(self.raw).then_some(self.raw)
    }

    /// Values of a comma-separated numeral list with at least two entries
    pub fn numeral_list(&self) -> Option<Vec<&'a str>> {
        RE_CRON_NUMERAL_LIST
            .is_match(self.raw)
            .then(|| self.raw.split(',').collect())
    }

    /// Comma-separated items, a single item for non-list fields
    pub fn items(&self) -> impl Iterator<Item = &'a str> {
        self.raw.split(',')
    }
}

/// Five-field cron expression split into its fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CronExpr<'a> {
    pub minute: CronField<'a>,
    pub hour: CronField<'a>,
    pub day_of_month: CronField<'a>,
    pub month: CronField<'a>,
    pub day_of_week: CronField<'a>,
}

impl<'a> CronExpr<'a> {
    /// `None` unless the expression has exactly five fields
    pub fn parse(expr: &'a str) -> Option<Self> {
        let fields: Vec<&str> = expr.split_whitespace().collect();
        let [minute, hour, day_of_month, month, day_of_week] = fields.as_slice() else {
            return None;
        };
        Some(Self {
            minute: CronField::new(*minute),
            hour: CronField::new(*hour),
            day_of_month: CronField::new(*day_of_month),
            month: CronField::new(*month),
            day_of_week: CronField::new(*day_of_week),
        })
    }

    fn calendar_is_any(&self) -> bool {
        self.day_of_month.is_any() && self.month.is_any() && self.day_of_week.is_any()
    }

    fn time_has_step(&self) -> bool {
        self.minute.has_step() || self.hour.has_step()
    }

    /// `HH:MM` when both hour and minute are plain numerals
    fn clock(&self) -> Option<String> {
        let hour = self.hour.numeral()?;
        let minute = self.minute.numeral()?;
        Some(clock(hour, minute))
    }
}

fn clock(hour: &str, minute: &str) -> String {
    format!("{:0>2}:{:0>2}", hour, minute)
}

/// Describe a cron expression in the given locale, or return it verbatim
pub fn humanize(expr: &str, locale: &str) -> String {
    let Some(cron) = CronExpr::parse(expr) else {
        return expr.to_string();
    };

    describe_fields(&cron, i18n::table(locale)).unwrap_or_else(|| expr.to_string())
}

fn describe_fields(cron: &CronExpr<'_>, table: &LocaleTable) -> Option<String> {
    // */N * * * *
    if let Some(n) = cron.minute.step() {
        if cron.hour.is_any() && cron.calendar_is_any() {
            return Some(table.every_minutes.replace("{n}", n));
        }
    }

    // 0 */N * * *
    if cron.minute.raw() == "0" && cron.calendar_is_any() {
        if let Some(n) = cron.hour.step() {
            return Some(table.every_hours.replace("{n}", n));
        }
    }

    if cron.time_has_step() {
        return None;
    }

    // Weekly: M H * * D[,D...]
    if cron.day_of_month.is_any() && cron.month.is_any() && !cron.day_of_week.is_any() {
        let time = cron.clock()?;
        let days = cron
            .day_of_week
            .items()
            .map(|d| table.weekday(d).unwrap_or(d))
            .collect::<Vec<_>>()
            .join(table.list_separator);
        return Some(
            table
                .weekly_at
                .replace("{days}", &days)
                .replace("{time}", &time),
        );
    }

    // Monthly: M H D * *
    if let Some(day) = cron.day_of_month.numeral() {
        if cron.month.is_any() && cron.day_of_week.is_any() {
            let time = cron.clock()?;
            return Some(
                table
                    .monthly_at
                    .replace("{day}", day)
                    .replace("{time}", &time),
            );
        }
    }

    // Daily: M H * * * or M H1,H2 * * *
    if cron.calendar_is_any() {
        let time = match cron.hour.numeral_list() {
            Some(hours) => {
                let minute = cron.minute.numeral()?;
                hours
                    .into_iter()
                    .map(|h| clock(h, minute))
                    .collect::<Vec<_>>()
                    .join(table.list_separator)
            }
            None => cron.clock()?,
        };
        return Some(table.daily_at.replace("{time}", &time));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_step() {
        for n in [1, 5, 15, 30, 45, 90] {
            assert_eq!(humanize(&format!("*/{} * * * *", n), "en"), format!("every {}m", n));
        }
    }

    #[test]
    fn test_hour_step_at_minute_zero() {
        for n in [1, 2, 4, 6, 12] {
            assert_eq!(humanize(&format!("0 */{} * * *", n), "en"), format!("every {}h", n));
        }
    }

    #[test]
    fn test_hour_step_requires_minute_zero() {
        assert_eq!(humanize("15 */2 * * *", "en"), "15 */2 * * *");
    }

    #[test]
    fn test_weekly() {
        assert_eq!(humanize("0 9 * * 1,3", "en"), "Mon, Wed 09:00");
        assert_eq!(humanize("30 18 * * 5", "en"), "Fri 18:30");
        assert_eq!(humanize("0 9 * * 0,6", "zh"), "周日, 周六 09:00");
    }

    #[test]
    fn test_weekly_unknown_day_passes_through() {
        assert_eq!(humanize("0 9 * * 1,7", "en"), "Mon, 7 09:00");
        assert_eq!(humanize("0 9 * * 1-5", "en"), "1-5 09:00");
    }

    #[test]
    fn test_monthly() {
        assert_eq!(humanize("30 14 15 * *", "en"), "on day 15 at 14:30");
        assert_eq!(humanize("0 8 1 * *", "zh"), "每月 1 日 08:00");
    }

    #[test]
    fn test_daily_single_and_multiple_times() {
        assert_eq!(humanize("0 9 * * *", "en"), "daily at 09:00");
        assert_eq!(humanize("5 0 * * *", "en"), "daily at 00:05");
        assert_eq!(humanize("0 9,18 * * *", "en"), "daily at 09:00, 18:00");
        assert_eq!(humanize("30 8,12,20 * * *", "zh"), "每天 08:30, 12:30, 20:30");
    }

    #[test]
    fn test_minute_step_takes_precedence() {
        // Every other field is daily-shaped; the minute step wins
        assert_eq!(humanize("*/10 * * * *", "en"), "every 10m");
    }

    #[test]
    fn test_unsupported_locale_uses_default_table() {
        assert_eq!(humanize("0 9 * * 1", "fr-FR"), "Mon 09:00");
        assert_eq!(humanize("*/5 * * * *", "zh-CN"), "每 5 分钟");
    }

    #[test]
    fn test_wrong_field_count_is_verbatim() {
        assert_eq!(humanize("", "en"), "");
        assert_eq!(humanize("* * * *", "en"), "* * * *");
        assert_eq!(humanize("0 0 9 * * 1", "en"), "0 0 9 * * 1");
        assert_eq!(humanize("not a cron", "en"), "not a cron");
    }

    #[test]
    fn test_unmatched_shapes_are_verbatim() {
        for expr in [
            "0 * * * *",
            "* * * * *",
            "*/5 9 * * *",
            "0 9 1 1 *",
            "0 9 1,15 * *",
            "0 9 15 * 1",
            "0 9-17 * * *",
            "5/10 * * * *",
            "0 9,*/2 * * *",
            "0 */2 * * 1",
            "0 9 * JAN *",
        ] {
            assert_eq!(humanize(expr, "en"), expr, "expected verbatim for {:?}", expr);
        }
    }

    #[test]
    fn test_humanize_is_idempotent_on_unrecognized_input() {
        for expr in ["0 * * * *", "x y z", "0 9-17 * * 1-5 extra"] {
            let once = humanize(expr, "en");
            assert_eq!(humanize(&once, "en"), once);
        }
    }

    #[test]
    fn test_extra_whitespace_is_tolerated() {
        assert_eq!(humanize("  0   9  * *   1 ", "en"), "Mon 09:00");
    }

    #[test]
    fn test_field_accessors() {
        let cron = CronExpr::parse("*/5 9,18 1 * 1-5").unwrap();
        assert_eq!(cron.minute.step(), Some("5"));
        assert!(cron.minute.has_step());
        assert_eq!(cron.hour.numeral_list(), Some(vec!["9", "18"]));
        assert_eq!(cron.day_of_month.numeral(), Some("1"));
        assert!(cron.month.is_any());
        assert_eq!(cron.day_of_week.items().collect::<Vec<_>>(), vec!["1-5"]);
    }
}
