//! File upload proxy endpoint
//!
//! Accepts a multipart form from the client, re-encodes the file plus the
//! `user` and `type` fields into a fresh outbound form, and relays whatever
//! Dify answers.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{
    multipart::{Multipart, MultipartRejection},
    State,
};
use bytes::Bytes;
use tracing::{info, warn};

use crate::{
    dify::Passthrough,
    error::{AppError, AppResult, ProxyFailure},
    routes::metrics::record_request,
    AppState,
};

/// Fallback for an absent `user` field
pub const DEFAULT_USER: &str = "chat-user";
/// Fallback for an absent `type` field
pub const DEFAULT_TYPE: &str = "TXT";

/// Fallback filename for a file part that carries none
const DEFAULT_FILENAME: &str = "file";

/// Upload proxy handler
///
/// The token gate runs before the form is touched, so an unconfigured relay
/// answers the same soft failure no matter what body it is sent. Any error
/// while walking the form counts as a missing file; an error while draining
/// the file part counts as a copy failure and soft-fails.
#[utoipa::path(
    post,
    path = "/api/dify/upload",
    tag = "dify",
    request_body(
        content_type = "multipart/form-data",
        description = "Form with a required `file` part and optional `user` and `type` fields"
    ),
    responses(
        (status = 200, description = "Dify response relayed verbatim, or a soft failure with success=false", body = ProxyFailure),
        (status = 400, description = "Missing file part", body = ProxyFailure)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Passthrough> {
    let start = Instant::now();

    if !state.dify.is_configured() {
        warn!("Upload rejected: no Dify API token configured");
        return Err(AppError::TokenMissing);
    }

    let mut multipart = multipart.map_err(|_| AppError::MissingFile)?;

    let mut file: Option<(String, Bytes)> = None;
    let mut user: Option<String> = None;
    let mut file_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::MissingFile)?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let filename = field
                    .file_name()
                    .unwrap_or(DEFAULT_FILENAME)
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Encode(e.to_string()))?;
                file = Some((filename, data));
            }
            "user" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Encode(e.to_string()))?;
                if !text.is_empty() {
                    user = Some(text);
                }
            }
            "type" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Encode(e.to_string()))?;
                if !text.is_empty() {
                    file_type = Some(text);
                }
            }
            // Unknown fields are ignored, not forwarded
            _ => {}
        }
    }

    let (filename, data) = file.ok_or(AppError::MissingFile)?;
    let user = user.unwrap_or_else(|| DEFAULT_USER.to_string());
    let file_type = file_type.unwrap_or_else(|| DEFAULT_TYPE.to_string());

    info!(
        filename = %filename,
        size = data.len(),
        user = %user,
        file_type = %file_type,
        "Forwarding file upload to Dify"
    );

    let response = state
        .dify
        .upload_file(&filename, data, &user, &file_type)
        .await?;

    let duration = start.elapsed().as_secs_f64();
    let status_label = if response.status.is_success() {
        "success"
    } else {
        "error"
    };
    record_request(status_label, "upload", duration);

    info!(
        status = %response.status,
        duration_ms = %format!("{:.2}", duration * 1000.0),
        "Upload relay completed"
    );

    Ok(response)
}
