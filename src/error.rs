use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::time::Duration;
use thiserror::Error;

use crate::types::ErrorResponse;

/// Failures surfaced by the analysis pipeline.
///
/// The analyzer itself is total, so in practice only URL validation and the
/// fetcher produce these. `Analysis` exists for the blocking worker dying
/// underneath us and should be treated as a defect when it shows up.
#[derive(Debug, Error)]
pub enum SeoError {
    #[error("invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("analysis failed: {0}")]
    Analysis(String),
}

impl SeoError {
    pub fn invalid_url(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SeoError::InvalidUrl { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            SeoError::Fetch(_) | SeoError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SeoError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorResponse {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Why a page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("could not connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("{status} for url: {url}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
}

impl FetchError {
    /// Classify a transport error from reqwest.
    pub fn from_reqwest(url: &str, timeout: Duration, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            FetchError::Timeout { url, timeout }
        } else if let Some(status) = err.status() {
            FetchError::Status {
                url,
                status: status.as_u16(),
            }
        } else if err.is_connect() {
            FetchError::Connect {
                url,
                message: err.to_string(),
            }
        } else if err.is_body() || err.is_decode() {
            FetchError::Body {
                url,
                message: err.to_string(),
            }
        } else {
            FetchError::Request {
                url,
                message: err.to_string(),
            }
        }
    }
}

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(name: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let invalid = SeoError::invalid_url("nope", "relative URL without a base");
        assert_eq!(invalid.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let fetch = SeoError::from(FetchError::Status {
            url: "https://example.com/".into(),
            status: 404,
        });
        assert_eq!(fetch.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let analysis = SeoError::Analysis("worker panicked".into());
        assert_eq!(analysis.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::Status {
            url: "https://example.com/missing".into(),
            status: 404,
        };
        assert_eq!(err.to_string(), "404 for url: https://example.com/missing");

        let err = FetchError::Timeout {
            url: "https://slow.example/".into(),
            timeout: Duration::from_secs(10),
        };
        assert!(err.to_string().contains("timed out after 10s"));

        let err = FetchError::Timeout {
            url: "https://slow.example/".into(),
            timeout: Duration::from_millis(250),
        };
        assert!(err.to_string().contains("timed out after 250ms"));

        // Fetch errors pass through untouched
        let wrapped = SeoError::from(err);
        assert!(wrapped.to_string().starts_with("request to https://slow.example/"));
    }
}
