//! OpenAPI specification for the Dify Relay API
//!
//! Aggregates the proxy endpoints and the shared failure schema into a
//! single OpenAPI document, served via Swagger UI at `/docs`.

use utoipa::OpenApi;

use crate::error::ProxyFailure;

/// OpenAPI specification for the Dify Relay API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dify Relay API",
        version = "0.1.0",
        description = "Credential-injecting relay for Dify file uploads and workflow runs. \
                       Successful calls return the Dify response verbatim; relay-originated \
                       failures share the `{success, message}` payload."
    ),
    paths(
        crate::routes::upload::upload_file,
        crate::routes::workflow::run_workflow,
    ),
    components(schemas(ProxyFailure)),
    tags(
        (name = "dify", description = "Proxy endpoints forwarding to the configured Dify deployment")
    )
)]
pub struct ApiDoc;
