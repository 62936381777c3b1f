use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// When a job fires, as reported by the upstream API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "dashboard/")]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScheduleSpec {
    /// Fixed interval in milliseconds
    Every {
        #[serde(rename = "everyMs")]
        #[ts(type = "number")]
        every_ms: u64,
    },
    /// One-shot at an ISO 8601 instant
    At { at: String },
    /// 5-field cron expression: minute hour day-of-month month day-of-week
    Cron {
        expr: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tz: Option<String>,
    },
}

/// Job entry from the upstream job list
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJob {
    #[serde(alias = "id")]
    pub job_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true", deserialize_with = "enabled_or_default")]
    pub enabled: bool,
    /// `None` when absent or of a kind this dashboard doesn't know
    #[serde(default, deserialize_with = "schedule_or_none")]
    pub schedule: Option<ScheduleSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

fn default_true() -> bool {
    true
}

fn enabled_or_default<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_true))
}

fn schedule_or_none<'de, D>(deserializer: D) -> Result<Option<ScheduleSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Final state of a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "dashboard/")]
#[serde(rename_all = "lowercase")]
pub enum RunOutcome {
    #[serde(alias = "ok", alias = "succeeded")]
    Success,
    #[serde(alias = "error", alias = "failure")]
    Failed,
    Running,
    Timeout,
    Cancelled,
    Skipped,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RunOutcome {
    pub fn is_failure(self) -> bool {
        matches!(self, RunOutcome::Failed | RunOutcome::Timeout)
    }
}

/// One entry of a job's run history
///
/// The upstream API writes two shapes; serde picks the variant from the
/// fields present (`startedAt` vs `ts`), so display code only sees one type.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunRecord {
    Lifecycle(LifecycleRun),
    Summary(SummaryRun),
}

/// `{startedAt, endedAt?, outcome, error?}`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleRun {
    #[serde(deserialize_with = "crate::utils::timestamp::deserialize")]
    pub started_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "crate::utils::timestamp::option::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "status")]
    pub outcome: RunOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `{ts, durationMs, summary}`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRun {
    #[serde(deserialize_with = "crate::utils::timestamp::deserialize")]
    pub ts: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl RunRecord {
    pub fn started_at(&self) -> DateTime<Utc> {
        match self {
            RunRecord::Lifecycle(run) => run.started_at,
            RunRecord::Summary(run) => run.ts,
        }
    }

    /// Wall-clock duration; `None` while a lifecycle run has not ended
    pub fn duration_ms(&self) -> Option<i64> {
        match self {
            RunRecord::Lifecycle(run) => run
                .ended_at
                .map(|end| (end - run.started_at).num_milliseconds().max(0)),
            RunRecord::Summary(run) => run.duration_ms,
        }
    }

    /// Summary records carry no outcome field and report `Unknown`
    pub fn outcome(&self) -> RunOutcome {
        match self {
            RunRecord::Lifecycle(run) => run.outcome,
            RunRecord::Summary(_) => RunOutcome::Unknown,
        }
    }

    /// Error message for lifecycle runs, summary text for summary runs
    pub fn detail(&self) -> Option<&str> {
        match self {
            RunRecord::Lifecycle(run) => run.error.as_deref(),
            RunRecord::Summary(run) => run.summary.as_deref(),
        }
    }
}

/// Run history statistics
#[derive(Clone, Debug, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "dashboard/")]
pub struct RunStats {
    pub total_runs: u32,
    pub success_count: u32,
    pub failure_count: u32,
    pub success_rate: f32, // 0.0 - 1.0
    pub avg_duration_ms: Option<f64>,
}

// ========================
// API response types for frontend
// ========================

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard/")]
pub struct JobView {
    pub job_id: String,
    pub name: String,
    pub enabled: bool,
    pub agent_id: Option<String>,
    pub schedule: String,             // Human-readable
    pub cron_expression: Option<String>, // Raw expression for cron schedules
    pub next_run: Option<String>,     // RFC 3339
    pub status: Option<String>,       // As reported by the watchdog
    pub last_run_at: Option<String>,  // RFC 3339
    pub last_run: String,             // Relative, e.g. "5 minutes ago"
}

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard/")]
pub struct RunView {
    pub started_at: String,
    pub started: String,
    pub duration: String,
    #[ts(type = "number | null")]
    pub duration_ms: Option<i64>,
    pub outcome: RunOutcome,
    pub detail: Option<String>,
}

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard/")]
pub struct RunHistoryView {
    pub job_id: String,
    pub runs: Vec<RunView>,
    pub stats: RunStats,
}

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard/")]
pub struct ScheduleDescription {
    pub text: String,
    pub next_runs: Vec<String>,
}
