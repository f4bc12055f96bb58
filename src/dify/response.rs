//! Verbatim passthrough of a downstream response
//!
//! The relay copies exactly three things from Dify back to the caller:
//! status code, `Content-Type` header, and raw body bytes. Modeling that as
//! one value keeps the rest of the call chain from ever re-parsing or
//! re-encoding the downstream body.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::error::{AppError, AppResult};

/// Downstream status, content type, and body, relayed unmodified
#[derive(Debug)]
pub struct Passthrough {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl Passthrough {
    /// Capture a downstream response, reading the body to completion.
    ///
    /// A downstream non-2xx status is not an error here; failing to read
    /// the body is.
    pub async fn from_upstream(response: reqwest::Response) -> AppResult<Self> {
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| HeaderValue::from_bytes(value.as_bytes()).ok());

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        Ok(Self {
            status,
            content_type,
            body,
        })
    }
}

impl IntoResponse for Passthrough {
    fn into_response(self) -> Response {
        let mut builder = Response::builder().status(self.status);
        if let Some(content_type) = self.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        match builder.body(Body::from(self.body)) {
            Ok(response) => response,
            Err(_) => StatusCode::BAD_GATEWAY.into_response(),
        }
    }
}
