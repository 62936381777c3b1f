use serde::Serialize;
use std::fmt;

/// Structured error type shared by the upstream client, config loader and API
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error codes for categorizing different error types
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Upstream API errors
    UpstreamTimeout,
    UpstreamUnavailable,
    UpstreamError,
    ParseError,

    // Config errors
    ConfigError,
    FileReadError,

    // Request errors
    InvalidParams,
    NotFound,

    // Generic
    Unknown,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(details) = &self.details {
            write!(f, "{:?}: {} - {}", self.code, self.message, details)
        } else {
            write!(f, "{:?}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for AppError {}

impl From<AppError> for String {
    fn from(err: AppError) -> String {
        serde_json::to_string(&err).unwrap_or_else(|_| err.message)
    }
}

// Convenience constructors
impl AppError {
    pub fn upstream_timeout(url: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::UpstreamTimeout,
            message: "Upstream API did not respond in time".to_string(),
            details: Some(url.into()),
        }
    }

    pub fn upstream_unavailable(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::UpstreamUnavailable,
            message: "Upstream API is unreachable".to_string(),
            details: Some(msg.into()),
        }
    }

    pub fn upstream_error(status: u16, body: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::UpstreamError,
            message: format!("Upstream API returned status {}", status),
            details: Some(body.into()),
        }
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ParseError,
            message: msg.into(),
            details: None,
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ConfigError,
            message: msg.into(),
            details: None,
        }
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidParams,
            message: msg.into(),
            details: None,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NotFound,
            message: "Not found".to_string(),
            details: Some(what.into()),
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Unknown,
            message: msg.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// Conversions from common error types
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::NotFound => Self::not_found(err.to_string()),
            _ => Self {
                code: ErrorCode::FileReadError,
                message: "File read error".to_string(),
                details: Some(err.to_string()),
            },
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_error(format!("JSON serialization error: {}", err))
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_error(format!("Failed to parse YAML: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        if err.is_timeout() {
            Self::upstream_timeout(url)
        } else if err.is_connect() {
            Self::upstream_unavailable(err.to_string())
        } else if err.is_decode() {
            Self::parse_error(format!("Failed to decode upstream response: {}", err))
        } else if let Some(status) = err.status() {
            Self::upstream_error(status.as_u16(), err.to_string())
        } else {
            Self::unknown(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_details() {
        let err = AppError::not_found("job-42");
        assert_eq!(err.to_string(), "NotFound: Not found - job-42");
    }

    #[test]
    fn test_serializes_screaming_snake_code() {
        let json: String = AppError::upstream_error(502, "bad gateway").into();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["code"], "UPSTREAM_ERROR");
        assert_eq!(value["details"], "bad gateway");
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let value = serde_json::to_value(AppError::invalid_params("count must be > 0")).unwrap();
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(AppError::from(io).code, ErrorCode::NotFound);
    }
}
