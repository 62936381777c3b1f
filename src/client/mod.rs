//! Client for the platform's job/watchdog API
//!
//! Read calls deserialize straight into the typed models; the two run-record
//! shapes are resolved here so nothing downstream sees raw JSON. List entries
//! are decoded one at a time, and a malformed entry is logged and skipped.
//! Control actions return the upstream body unchanged.

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::DashboardConfig;
use crate::cronos::{CronJob, RunRecord};
use crate::error::AppError;
use crate::watchdog::WatchdogSnapshot;

/// Connection check timeout (shorter than the request timeout)
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// List endpoints answer either with a bare array or with a wrapper object
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "jobs", alias = "runs")]
        items: Vec<T>,
    },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { items } => items,
        }
    }
}

impl Listing<serde_json::Value> {
    fn decode_each<T: DeserializeOwned>(self, what: &str) -> Vec<T> {
        self.into_vec()
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::warn!(what, index, error = %e, "skipping malformed upstream record");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl UpstreamClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::config_error(format!("Invalid api_url '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::config_error(format!(
                "Invalid api_url '{}': not a base URL",
                base_url
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| AppError::unknown(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, AppError> {
        Self::new(
            &config.api_url,
            config.api_token.clone(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// List all cron jobs
    pub async fn list_jobs(&self) -> Result<Vec<CronJob>, AppError> {
        let url = self.url(&["api", "cron", "jobs"])?;
        let listing: Listing<serde_json::Value> = self.get_json(url).await?;
        Ok(listing.decode_each("job"))
    }

    /// Run history for one job, in upstream order
    pub async fn job_runs(&self, job_id: &str) -> Result<Vec<RunRecord>, AppError> {
        let url = self.url(&["api", "cron", "jobs", job_id, "runs"])?;
        let listing: Listing<serde_json::Value> = self.get_json(url).await?;
        Ok(listing.decode_each("run"))
    }

    /// Current watchdog status snapshot
    pub async fn watchdog_status(&self) -> Result<WatchdogSnapshot, AppError> {
        let url = self.url(&["api", "watchdog", "status"])?;
        self.get_json(url).await
    }

    /// Ask the scheduler to run a job now
    pub async fn trigger_job(&self, job_id: &str) -> Result<serde_json::Value, AppError> {
        let url = self.url(&["api", "cron", "jobs", job_id, "run"])?;
        self.post_json(url).await
    }

    /// Deploy (or redeploy) the watchdog process
    pub async fn deploy_watchdog(&self) -> Result<serde_json::Value, AppError> {
        let url = self.url(&["api", "watchdog", "deploy"])?;
        self.post_json(url).await
    }

    fn url(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::config_error("api_url cannot be a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        let response = self.authorize(self.http.get(url)).send().await?;
        Self::decode(response).await
    }

    async fn post_json(&self, url: Url) -> Result<serde_json::Value, AppError> {
        let response = self.authorize(self.http.post(url)).send().await?;
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(serde_json::json!({ "success": true }));
        }
        Ok(serde_json::from_str(&body)
            .unwrap_or_else(|_| serde_json::json!({ "success": true, "message": body })))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let response = Self::check_status(response).await?;
        let url = response.url().to_string();
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            AppError::parse_error(format!("Failed to parse upstream response: {}", e))
                .with_details(url)
        })
    }

    async fn check_status(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::not_found(url));
        }
        tracing::warn!(%status, %url, "upstream request failed");
        Err(AppError::upstream_error(status.as_u16(), body))
    }
}
