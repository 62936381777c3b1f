//! HTTP API server module
//!
//! REST and WebSocket endpoints for the dashboard front end. Job data is
//! proxied from the upstream API on each request; watchdog status comes from
//! the background poller's cache.

pub mod handlers;
mod routes;
pub mod ws;

pub use routes::create_router;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::client::UpstreamClient;
use crate::config::DashboardConfig;
use crate::error::{AppError, ErrorCode};
use crate::i18n;
use crate::poller::Poller;
use crate::watchdog::WatchdogSnapshot;

/// Shared application state for HTTP handlers
pub struct AppState {
    pub client: UpstreamClient,
    /// Locale used when a request doesn't pass `?locale=`
    pub default_locale: &'static str,
    pub staleness_threshold_ms: i64,
    /// Background watchdog status poll
    pub watchdog: Poller<WatchdogSnapshot>,
}

impl AppState {
    /// Build the state and start the watchdog poller
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &DashboardConfig) -> Result<Self, AppError> {
        let client = UpstreamClient::from_config(config)?;
        Ok(Self::with_client(
            client,
            config.default_locale(),
            config.staleness_threshold_ms,
            config.poll_interval(),
        ))
    }

    pub fn with_client(
        client: UpstreamClient,
        default_locale: &'static str,
        staleness_threshold_ms: i64,
        poll_interval: std::time::Duration,
    ) -> Self {
        let poll_client = client.clone();
        let watchdog = Poller::spawn("watchdog", poll_interval, move || {
            let client = poll_client.clone();
            async move { client.watchdog_status().await }
        });

        Self {
            client,
            default_locale,
            staleness_threshold_ms,
            watchdog,
        }
    }

    /// Requested locale, resolved against the registry, else the default
    pub fn locale(&self, requested: Option<&str>) -> &'static str {
        requested.map(i18n::resolve).unwrap_or(self.default_locale)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidParams => StatusCode::BAD_REQUEST,
            ErrorCode::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorCode::UpstreamUnavailable | ErrorCode::UpstreamError | ErrorCode::ParseError => {
                StatusCode::BAD_GATEWAY
            }
            ErrorCode::ConfigError | ErrorCode::FileReadError | ErrorCode::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.message,
            "code": self.code,
            "details": self.details,
        });
        (status, Json(body)).into_response()
    }
}

/// Start the HTTP API server
///
/// SECURITY: Binding to 0.0.0.0 exposes the dashboard (and the trigger and
/// deploy actions it proxies) to the network.
pub async fn start_server(config: DashboardConfig) -> Result<(), AppError> {
    let state = Arc::new(AppState::new(&config)?);
    let upstream = state.client.base_url().to_string();

    // Configure CORS for cross-origin requests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state).layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| {
            AppError::config_error(format!("Invalid bind address {}:{}", config.host, config.port))
                .with_details(format!("{}", e))
        })?;

    if config.host == "0.0.0.0" {
        tracing::warn!("server binding to 0.0.0.0 - accessible from network");
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::config_error(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!(%addr, %upstream, "HTTP API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::unknown(format!("HTTP server error: {}", e)))?;

    tracing::info!("HTTP API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
