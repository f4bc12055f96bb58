//! HTTP routes for Dify Relay
//!
//! This module defines all HTTP endpoints exposed by the relay.

pub mod docs;
pub mod health;
pub mod metrics;
pub mod upload;
pub mod workflow;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Proxy routes carry the configurable body limit; everything they accept
    // is buffered before the outbound call
    let proxy_routes = Router::new()
        .route("/api/dify/upload", post(upload::upload_file))
        .route("/api/dify/workflow", post(workflow::run_workflow))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes));

    // Public routes (health checks, metrics) - no body limit concerns
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .merge(public_routes)
        .merge(proxy_routes)
        .merge(docs::create_docs_router())
        // Global middleware (applied to all routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
