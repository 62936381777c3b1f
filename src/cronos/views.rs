//! Dashboard views over jobs and run history

use chrono::{DateTime, Utc};

use super::describe::{describe, next_run};
use super::types::*;
use crate::constants::PLACEHOLDER;
use crate::utils::format::{format_duration, relative_time, relative_time_opt};
use crate::watchdog::WatchdogSnapshot;

/// Join a job with the watchdog's runtime entry for it
pub fn build_job_view(
    job: &CronJob,
    snapshot: Option<&WatchdogSnapshot>,
    now: DateTime<Utc>,
    locale: &str,
) -> JobView {
    let runtime = snapshot.and_then(|s| s.jobs.get(&job.job_id));
    let last_run_at = runtime.and_then(|r| r.last_run_at);

    let cron_expression = match &job.schedule {
        Some(ScheduleSpec::Cron { expr, .. }) => Some(expr.clone()),
        _ => None,
    };

    let next_run = if job.enabled {
        job.schedule.as_ref().and_then(|spec| next_run(spec, now))
    } else {
        None
    };

    JobView {
        job_id: job.job_id.clone(),
        name: job.name.clone(),
        enabled: job.enabled,
        agent_id: job.agent_id.clone(),
        schedule: describe(job.schedule.as_ref(), locale),
        cron_expression,
        next_run,
        status: runtime.and_then(|r| r.status.clone()),
        last_run_at: last_run_at.map(|dt| dt.to_rfc3339()),
        last_run: relative_time_opt(last_run_at, now, locale),
    }
}

pub fn build_job_views(
    jobs: &[CronJob],
    snapshot: Option<&WatchdogSnapshot>,
    now: DateTime<Utc>,
    locale: &str,
) -> Vec<JobView> {
    jobs.iter()
        .map(|job| build_job_view(job, snapshot, now, locale))
        .collect()
}

pub fn build_run_view(run: &RunRecord, now: DateTime<Utc>, locale: &str) -> RunView {
    let duration_ms = run.duration_ms();
    RunView {
        started_at: run.started_at().to_rfc3339(),
        started: relative_time(run.started_at(), now, locale),
        duration: duration_ms
            .map(format_duration)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        duration_ms,
        outcome: run.outcome(),
        detail: run.detail().map(str::to_string),
    }
}

/// Newest run first, with aggregate stats over the whole history
pub fn build_run_history(
    job_id: &str,
    runs: &[RunRecord],
    now: DateTime<Utc>,
    locale: &str,
) -> RunHistoryView {
    let mut ordered: Vec<&RunRecord> = runs.iter().collect();
    ordered.sort_by_key(|r| std::cmp::Reverse(r.started_at()));

    RunHistoryView {
        job_id: job_id.to_string(),
        runs: ordered
            .into_iter()
            .map(|r| build_run_view(r, now, locale))
            .collect(),
        stats: RunStats::from_runs(runs),
    }
}
