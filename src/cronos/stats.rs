use super::types::{RunOutcome, RunRecord, RunStats};

impl RunStats {
    /// Aggregate a run history
    ///
    /// Failures are failed and timed-out runs; runs without a known outcome
    /// count toward the total only. The average covers records that carry a
    /// duration.
    pub fn from_runs(runs: &[RunRecord]) -> Self {
        if runs.is_empty() {
            return Self::default();
        }

        let total_runs = runs.len() as u32;
        let success_count = runs
            .iter()
            .filter(|r| r.outcome() == RunOutcome::Success)
            .count() as u32;
        let failure_count = runs.iter().filter(|r| r.outcome().is_failure()).count() as u32;

        let durations: Vec<f64> = runs
            .iter()
            .filter_map(|r| r.duration_ms().map(|d| d as f64))
            .collect();

        let avg_duration_ms = if durations.is_empty() {
            None
        } else {
            Some(durations.iter().sum::<f64>() / durations.len() as f64)
        };

        Self {
            total_runs,
            success_count,
            failure_count,
            success_rate: success_count as f32 / total_runs as f32,
            avg_duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(json: &str) -> Vec<RunRecord> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(RunStats::from_runs(&[]), RunStats::default());
    }

    #[test]
    fn test_mixed_history() {
        let history = runs(
            r#"[
                {"startedAt": 0, "endedAt": 2000, "outcome": "success"},
                {"startedAt": 0, "endedAt": 4000, "outcome": "failed", "error": "exit 1"},
                {"startedAt": 0, "outcome": "timeout"},
                {"ts": 0, "durationMs": 6000, "summary": "ok"}
            ]"#,
        );
        let stats = RunStats::from_runs(&history);
        assert_eq!(stats.total_runs, 4);
        assert_eq!(stats.success_count, 1);
        assert_eq!(stats.failure_count, 2);
        assert!((stats.success_rate - 0.25).abs() < f32::EPSILON);
        assert_eq!(stats.avg_duration_ms, Some(4000.0));
    }

    #[test]
    fn test_no_durations() {
        let history = runs(r#"[{"startedAt": 0, "outcome": "running"}]"#);
        let stats = RunStats::from_runs(&history);
        assert_eq!(stats.avg_duration_ms, None);
        assert_eq!(stats.success_rate, 0.0);
    }
}
