//! Workflow execution proxy endpoint
//!
//! Accepts an arbitrary JSON object, re-serializes it unchanged, and relays
//! the Dify workflow-run response. The payload is never interpreted.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use bytes::Bytes;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    dify::Passthrough,
    error::{AppError, AppResult, ProxyFailure},
    routes::metrics::record_request,
    AppState,
};

/// Workflow proxy handler
///
/// The body is read raw and parsed here rather than through the `Json`
/// extractor so the token gate runs first and malformed input produces the
/// uniform failure payload. Only JSON objects are accepted.
#[utoipa::path(
    post,
    path = "/api/dify/workflow",
    tag = "dify",
    request_body(
        content_type = "application/json",
        description = "Arbitrary JSON object forwarded to the Dify workflow run endpoint"
    ),
    responses(
        (status = 200, description = "Dify response relayed verbatim, or a soft failure with success=false", body = ProxyFailure),
        (status = 400, description = "Body is not a JSON object", body = ProxyFailure)
    )
)]
pub async fn run_workflow(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Passthrough> {
    let start = Instant::now();

    if !state.dify.is_configured() {
        warn!("Workflow run rejected: no Dify API token configured");
        return Err(AppError::TokenMissing);
    }

    let payload: Value = serde_json::from_slice(&body).map_err(|_| AppError::InvalidBody)?;
    if !payload.is_object() {
        return Err(AppError::InvalidBody);
    }

    info!(
        fields = payload.as_object().map(|m| m.len()).unwrap_or(0),
        "Forwarding workflow run to Dify"
    );

    let response = state.dify.run_workflow(&payload).await?;

    let duration = start.elapsed().as_secs_f64();
    let status_label = if response.status.is_success() {
        "success"
    } else {
        "error"
    };
    record_request(status_label, "workflow", duration);

    info!(
        status = %response.status,
        duration_ms = %format!("{:.2}", duration * 1000.0),
        "Workflow relay completed"
    );

    Ok(response)
}
