//! Headless cronboard server binary
//!
//! Serves the dashboard API in front of the platform's job/watchdog API.
//!
//! Usage:
//!   CRONBOARD_API_URL=http://10.0.0.2:18789 CRONBOARD_PORT=3040 ./cronboard-server
//!
//! Configuration is read from `~/.cronboard/config.yaml` (or `$CRONBOARD_CONFIG`);
//! see `cronboard_lib::config` for the environment overrides.
//! Log level via RUST_LOG (default: info).

use std::process::ExitCode;

use cronboard_lib::{api, config::DashboardConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match DashboardConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        upstream = %config.api_url,
        locale = config.default_locale(),
        poll_secs = config.poll_interval_secs,
        "starting cronboard server"
    );

    // Start HTTP API server (blocks until shutdown)
    match api::start_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}
