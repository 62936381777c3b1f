use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder shown wherever a value (schedule, timestamp) is missing
pub const PLACEHOLDER: &str = "—";

/// Watchdog checks older than this are treated as a crashed watchdog
pub const STALENESS_THRESHOLD_MS: i64 = 120_000;

/// Default interval between watchdog status polls
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Upper bound for next-run previews
pub const MAX_NEXT_RUNS: usize = 10;

/// Next-run preview length when the caller doesn't ask for one
pub const DEFAULT_NEXT_RUNS: usize = 5;

/// Default upstream job/watchdog API
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:18789";

/// Default bind address and port for the dashboard API
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3040;

/// Pre-compiled patterns for cron field matching
/// These are compiled once at first use and cached

/// Matches a step field: */{n}
/// Examples: */5, */15
pub static RE_CRON_STEP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\*/(\d+)$")
        .expect("Invalid regex pattern for cron step")
});

/// Matches a plain numeral field
/// Examples: 0, 9, 30
pub static RE_CRON_NUMERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+$")
        .expect("Invalid regex pattern for cron numeral")
});

/// Matches a comma-separated list of at least two numerals
/// Examples: 9,18 and 0,6,12,18
pub static RE_CRON_NUMERAL_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(,\d+)+$")
        .expect("Invalid regex pattern for cron numeral list")
});

/// Matches each run of digits, for rewriting numeric cron values
pub static RE_DIGITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+")
        .expect("Invalid regex pattern for digits")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_pattern_captures_interval() {
        let caps = RE_CRON_STEP.captures("*/15").unwrap();
        assert_eq!(&caps[1], "15");
        assert!(!RE_CRON_STEP.is_match("5/15"));
        assert!(!RE_CRON_STEP.is_match("*/"));
    }

    #[test]
    fn test_numeral_patterns() {
        assert!(RE_CRON_NUMERAL.is_match("09"));
        assert!(!RE_CRON_NUMERAL.is_match("9,18"));
        assert!(RE_CRON_NUMERAL_LIST.is_match("9,18"));
        assert!(!RE_CRON_NUMERAL_LIST.is_match("9"));
        assert!(!RE_CRON_NUMERAL_LIST.is_match("9,*/2"));
    }
}
