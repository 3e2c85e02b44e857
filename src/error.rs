//! Error types for the fallible seams of the client.
//!
//! ERROR HANDLING
//! ==============
//! Session reads, navbar updates and redirects never fail from the caller's
//! point of view; browser failures there are logged and swallowed. Only
//! configuration parsing, network calls and token decoding return errors.

use thiserror::Error;

/// Client configuration could not be applied.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid client config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown log level: {0}")]
    LogLevel(String),
}

/// The authenticated fetch wrapper could not complete a request.
///
/// `Network` carries the platform's own rejection message unchanged.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network request failed: {0}")]
    Network(String),
    #[error("no browser client is bound to this page")]
    Unavailable,
}

/// A bearer token could not be decoded into claims.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token claims are not valid JSON: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Typed API call failure.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("request failed: {0}")]
    Status(u16),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}
