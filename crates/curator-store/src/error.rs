//! Store client error types.

use thiserror::Error;

/// Errors from remote store calls.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The store returned a non-2xx, non-conflict status.
    #[error("store endpoint {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: serde_json::Error,
    },

    /// The response envelope broke the store contract.
    #[error("malformed response envelope from {endpoint}: {detail}")]
    InvalidEnvelope { endpoint: String, detail: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
