use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

/// Raw watchdog fields the health state is derived from
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchdogRawStatus {
    #[serde(default)]
    pub deployed: bool,
    #[serde(default)]
    pub alive: bool,
    #[serde(
        default,
        deserialize_with = "crate::utils::timestamp::option::deserialize"
    )]
    pub last_check_at: Option<DateTime<Utc>>,
}

/// Per-job entry the watchdog keeps
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRuntime {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::utils::timestamp::option::deserialize"
    )]
    pub last_run_at: Option<DateTime<Utc>>,
}

/// Full status payload from the upstream watchdog endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchdogSnapshot {
    #[serde(flatten)]
    pub status: WatchdogRawStatus,
    #[serde(default)]
    pub gateway_healthy: Option<bool>,
    #[serde(default)]
    pub jobs: HashMap<String, JobRuntime>,
}

/// Derived watchdog health
///
/// Never stored: recomputed from a `WatchdogRawStatus` and the current time
/// each time it is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "dashboard/")]
#[serde(rename_all = "snake_case")]
pub enum WatchdogHealth {
    NotDeployed,
    Stopped,
    /// Alive but has not reported a check yet
    Starting,
    Running,
    /// Alive per the API but its last check is older than the staleness threshold
    Crashed,
}

// ========================
// API response types for frontend
// ========================

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard/")]
pub struct WatchdogView {
    pub health: WatchdogHealth,
    pub last_check_at: Option<String>, // RFC 3339
    pub last_check: String,            // Relative
    pub gateway_healthy: Option<bool>,
    pub jobs: Vec<WatchdogJobView>,
}

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard/")]
pub struct WatchdogJobView {
    pub job_id: String,
    pub status: Option<String>,
    pub last_run: String,
}
