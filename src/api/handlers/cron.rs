//! Cron job HTTP handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use super::LocaleQuery;
use crate::api::AppState;
use crate::constants::DEFAULT_NEXT_RUNS;
use crate::cronos::views::{build_job_views, build_run_history};
use crate::cronos::{
    describe_schedule, validate_cron, JobView, RunHistoryView, ScheduleDescription, ScheduleSpec,
};
use crate::error::AppError;

/// List all jobs with their humanized schedule and watchdog status
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<JobView>>, AppError> {
    let jobs = state.client.list_jobs().await?;
    let snapshot = state.watchdog.latest().value;
    let locale = state.locale(query.locale.as_deref());
    Ok(Json(build_job_views(&jobs, snapshot.as_ref(), Utc::now(), locale)))
}

/// Run history for one job, newest first
pub async fn job_runs(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<RunHistoryView>, AppError> {
    let runs = state.client.job_runs(&job_id).await?;
    let locale = state.locale(query.locale.as_deref());
    Ok(Json(build_run_history(&job_id, &runs, Utc::now(), locale)))
}

/// Trigger a job to run now
pub async fn trigger_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state.client.trigger_job(&job_id).await?;
    tracing::info!(job_id = %job_id, "job triggered");
    // The watchdog reports the new run status on its next check
    state.watchdog.refresh();
    Ok(Json(result))
}

/// Describe request (schedule editor preview)
#[derive(Deserialize)]
pub struct DescribeRequest {
    schedule: ScheduleSpec,
    locale: Option<String>,
    count: Option<usize>,
}

/// Humanize a schedule and preview its next runs
pub async fn describe(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DescribeRequest>,
) -> Result<Json<ScheduleDescription>, AppError> {
    if let ScheduleSpec::Cron { expr, .. } = &req.schedule {
        validate_cron(expr)?;
    }

    let locale = state.locale(req.locale.as_deref());
    let count = req.count.unwrap_or(DEFAULT_NEXT_RUNS);
    Ok(Json(describe_schedule(&req.schedule, Utc::now(), locale, count)))
}
