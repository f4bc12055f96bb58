//! Dify Relay - credential-injecting proxy for the Dify API
//!
//! This library provides the core functionality for the relay server.
//! It forwards client file uploads and workflow-execution calls to a Dify
//! deployment with a server-held bearer token, relaying the downstream
//! response verbatim.

pub mod config;
pub mod dify;
pub mod docs;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::dify::{DifyClient, Passthrough};
pub use crate::error::{AppError, ProxyFailure};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub start_time: Instant,
    /// Outbound client holding the Dify credential
    pub dify: Arc<DifyClient>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .timeout(std::time::Duration::from_secs(300))
            .build()?;

        let dify = Arc::new(DifyClient::new(http_client.clone(), &config));

        Ok(Self {
            config,
            http_client,
            start_time: Instant::now(),
            dify,
        })
    }

    /// Create a new application state for testing
    ///
    /// Uses a plain HTTP client; tests point `config.dify_api_base` at a
    /// mock server.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_for_testing(config: Config) -> Self {
        let http_client = reqwest::Client::new();
        let dify = Arc::new(DifyClient::new(http_client.clone(), &config));

        Self {
            config,
            http_client,
            start_time: Instant::now(),
            dify,
        }
    }
}
