//! Watchdog HTTP handlers

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use super::LocaleQuery;
use crate::api::AppState;
use crate::error::AppError;
use crate::watchdog::{build_view, WatchdogView};

/// Current watchdog health from the poller cache
pub async fn get_watchdog(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
) -> Json<WatchdogView> {
    let locale = state.locale(query.locale.as_deref());
    Json(current_view(&state, locale))
}

/// Deploy the watchdog and poll again right away
pub async fn deploy(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state.client.deploy_watchdog().await?;
    tracing::info!("watchdog deploy requested");
    state.watchdog.refresh();
    Ok(Json(result))
}

pub(crate) fn current_view(state: &AppState, locale: &str) -> WatchdogView {
    let latest = state.watchdog.latest();
    build_view(
        latest.value.as_ref(),
        Utc::now(),
        locale,
        state.staleness_threshold_ms,
    )
}
