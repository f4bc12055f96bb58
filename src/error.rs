//! Error types for Dify Relay
//!
//! Every failure the relay produces itself is serialized to the single
//! `{"success": false, "message": "<text>"}` shape so clients always parse
//! JSON and check the flag. Configuration and forwarding failures are
//! reported with HTTP 200; only bad client input gets an HTTP error status.
//! Downstream non-2xx responses are not errors; they are relayed verbatim.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// No Dify API token is configured; the relay never goes to the network
    #[error("Dify 未配置 API Token")]
    TokenMissing,

    /// The upload form carries no `file` part (or the form is unreadable)
    #[error("缺少文件")]
    MissingFile,

    /// The workflow body is not a JSON object
    #[error("无效的请求体")]
    InvalidBody,

    /// Re-encoding the outbound body failed while copying the inbound stream
    #[error("{0}")]
    Encode(String),

    /// The outbound request could not be sent or its response not read
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

/// Failure payload returned for every relay-originated error
#[derive(Debug, Serialize, ToSchema)]
pub struct ProxyFailure {
    /// Always `false`
    pub success: bool,
    /// Human-readable failure reason; raw transport error text is passed on
    pub message: String,
}

impl ProxyFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Soft failures: clients get 200 and check the flag
            AppError::TokenMissing | AppError::Encode(_) | AppError::Transport(_) => {
                StatusCode::OK
            }
            AppError::MissingFile | AppError::InvalidBody => StatusCode::BAD_REQUEST,
        };

        (status, Json(ProxyFailure::new(self.to_string()))).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
