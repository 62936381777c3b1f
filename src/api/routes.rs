//! HTTP API route definitions

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::ws;
use super::AppState;

/// Create the main API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(handlers::health))
        // Cron jobs (static routes before dynamic {id} routes)
        .route("/api/cron/jobs", get(handlers::cron::list_jobs))
        .route("/api/cron/describe", post(handlers::cron::describe))
        .route("/api/cron/jobs/{id}/runs", get(handlers::cron::job_runs))
        .route("/api/cron/jobs/{id}/trigger", post(handlers::cron::trigger_job))
        // Watchdog
        .route("/api/watchdog", get(handlers::watchdog::get_watchdog))
        .route("/api/watchdog/deploy", post(handlers::watchdog::deploy))
        // WebSocket
        .route("/ws/watchdog", get(ws::watchdog_stream))
        .with_state(state)
}
