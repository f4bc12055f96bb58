//! Outbound Dify API layer
//!
//! Holds the credential-injecting client and the verbatim passthrough
//! response value it produces.

pub mod client;
pub mod response;

pub use client::DifyClient;
pub use response::Passthrough;
