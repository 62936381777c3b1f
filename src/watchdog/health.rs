//! watchdog/health.rs
//!
//! Health classification and the dashboard view of a watchdog snapshot.

use chrono::{DateTime, Utc};

use super::types::*;
use crate::constants::STALENESS_THRESHOLD_MS;
use crate::utils::format::relative_time_opt;

/// Classify with the default 120s staleness threshold
pub fn classify(status: &WatchdogRawStatus, now: DateTime<Utc>) -> WatchdogHealth {
    classify_with_threshold(status, now, STALENESS_THRESHOLD_MS)
}

/// First matching rule wins:
/// not deployed -> `NotDeployed`; not alive -> `Stopped`; no check yet ->
/// `Starting`; last check within the threshold (inclusive) -> `Running`;
/// otherwise `Crashed`.
pub fn classify_with_threshold(
    status: &WatchdogRawStatus,
    now: DateTime<Utc>,
    threshold_ms: i64,
) -> WatchdogHealth {
    if !status.deployed {
        return WatchdogHealth::NotDeployed;
    }
    if !status.alive {
        return WatchdogHealth::Stopped;
    }
    match status.last_check_at {
        None => WatchdogHealth::Starting,
        Some(checked) if (now - checked).num_milliseconds() <= threshold_ms => {
            WatchdogHealth::Running
        }
        Some(_) => WatchdogHealth::Crashed,
    }
}

/// A missing status is treated as not deployed
pub fn classify_opt(status: Option<&WatchdogRawStatus>, now: DateTime<Utc>) -> WatchdogHealth {
    status
        .map(|s| classify(s, now))
        .unwrap_or(WatchdogHealth::NotDeployed)
}

/// Build the dashboard view; `None` (no snapshot yet) renders as not deployed
pub fn build_view(
    snapshot: Option<&WatchdogSnapshot>,
    now: DateTime<Utc>,
    locale: &str,
    threshold_ms: i64,
) -> WatchdogView {
    let Some(snapshot) = snapshot else {
        return WatchdogView {
            health: WatchdogHealth::NotDeployed,
            last_check_at: None,
            last_check: relative_time_opt(None, now, locale),
            gateway_healthy: None,
            jobs: Vec::new(),
        };
    };

    let mut jobs: Vec<WatchdogJobView> = snapshot
        .jobs
        .iter()
        .map(|(job_id, runtime)| WatchdogJobView {
            job_id: job_id.clone(),
            status: runtime.status.clone(),
            last_run: relative_time_opt(runtime.last_run_at, now, locale),
        })
        .collect();
    jobs.sort_by(|a, b| a.job_id.cmp(&b.job_id));

    WatchdogView {
        health: classify_with_threshold(&snapshot.status, now, threshold_ms),
        last_check_at: snapshot.status.last_check_at.map(|dt| dt.to_rfc3339()),
        last_check: relative_time_opt(snapshot.status.last_check_at, now, locale),
        gateway_healthy: snapshot.gateway_healthy,
        jobs,
    }
}
