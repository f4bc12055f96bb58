//! Configuration management for Dify Relay
//!
//! Configuration is loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Default maximum inbound body size (50 MiB)
const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Dify API base URL
    pub dify_api_base: String,
    /// Dify API token; `None` means the relay is not configured and
    /// every proxy call soft-fails without touching the network
    pub dify_api_token: Option<String>,

    /// Maximum inbound request body size in bytes
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("RELAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("RELAY_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid RELAY_PORT")?,

            dify_api_base: env::var("DIFY_API_BASE")
                .unwrap_or_else(|_| "https://api.dify.ai/v1".to_string()),
            // An empty token counts as unset
            dify_api_token: env::var("DIFY_API_TOKEN").ok().filter(|t| !t.is_empty()),

            max_body_bytes: env::var("RELAY_MAX_BODY_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_BODY_BYTES.to_string())
                .parse()
                .context("Invalid RELAY_MAX_BODY_BYTES")?,
        })
    }
}
