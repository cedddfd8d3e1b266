//! HTTP error surface
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Unified `{error, details?}` body across all failure paths

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Request-scoped failures. A failure in one request never affects
/// another and never takes the process down.
#[derive(Debug)]
pub enum ApiError {
    /// Body was not JSON with a `messages` array
    InvalidRequest {
        message: String,
        details: Option<String>,
    },
    /// No persona document is loaded under this route id
    UnknownPersona(String),
    /// Client exhausted its sliding window
    RateLimited,
    /// Outbound completion call failed; detail carries the diagnostics
    Upstream(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidRequest { message, details } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    details,
                },
            ),
            ApiError::UnknownPersona(id) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: format!("Unknown persona '{id}'"),
                    details: None,
                },
            ),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorBody {
                    error: "Too many requests from this IP, please try again later.".to_string(),
                    details: None,
                },
            ),
            ApiError::Upstream(err) => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    error: "Error fetching response from completion API".to_string(),
                    details: Some(format!("{err:#}")),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
