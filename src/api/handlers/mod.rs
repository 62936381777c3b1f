//! HTTP request handlers

pub mod cron;
pub mod watchdog;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::i18n;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Locales accepted by `?locale=`
    locales: Vec<&'static str>,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        locales: i18n::supported_locales(),
    })
}

/// `?locale=` query accepted by every view endpoint
#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}
