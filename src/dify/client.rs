//! Dify API client
//!
//! Builds the outbound requests for both proxied operations, injecting the
//! server-held bearer token. Each call performs exactly one network request;
//! there is no retry and no timeout beyond the shared client's default.

use bytes::Bytes;
use reqwest::multipart;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::{
    config::Config,
    dify::Passthrough,
    error::{AppError, AppResult},
};

/// Client for the Dify API, holding the server-side credential
pub struct DifyClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl DifyClient {
    /// Create a new Dify client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.dify_api_base.trim_end_matches('/').to_string(),
            token: config.dify_api_token.clone(),
        }
    }

    /// Check if the client is configured with an API token
    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Forward an uploaded file to `POST {base}/files/upload`.
    ///
    /// The file bytes are re-encoded into a fresh multipart form together
    /// with the `user` and `type` fields, preserving the original filename.
    pub async fn upload_file(
        &self,
        filename: &str,
        data: Bytes,
        user: &str,
        file_type: &str,
    ) -> AppResult<Passthrough> {
        let token = self.token.as_ref().ok_or(AppError::TokenMissing)?;
        let url = format!("{}/files/upload", self.base_url);

        let file_part = multipart::Part::bytes(data.to_vec()).file_name(filename.to_string());
        let form = multipart::Form::new()
            .part("file", file_part)
            .text("user", user.to_string())
            .text("type", file_type.to_string());

        debug!(url = %url, filename = %filename, "Sending upload to Dify");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Failed to send upload to Dify");
                AppError::Transport(e.to_string())
            })?;

        info!(url = %url, status = %response.status(), "Received upload response from Dify");
        Passthrough::from_upstream(response).await
    }

    /// Forward a workflow execution to `POST {base}/workflows/run`.
    ///
    /// The payload is the parsed inbound JSON object, re-serialized as-is.
    pub async fn run_workflow(&self, payload: &Value) -> AppResult<Passthrough> {
        let token = self.token.as_ref().ok_or(AppError::TokenMissing)?;
        let url = format!("{}/workflows/run", self.base_url);

        debug!(url = %url, "Sending workflow run to Dify");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Failed to send workflow run to Dify");
                AppError::Transport(e.to_string())
            })?;

        info!(url = %url, status = %response.status(), "Received workflow response from Dify");
        Passthrough::from_upstream(response).await
    }
}
