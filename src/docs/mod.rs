//! OpenAPI documentation for the relay's HTTP surface

pub mod openapi;

pub use openapi::ApiDoc;
