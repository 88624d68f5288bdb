//! Unified error taxonomy for the model engine.
//!
//! One top-level [`ModelError`] for the whole crate, with nested enums for
//! configuration problems and engine-side failures. Transport errors from
//! `reqwest` are classified at the call site into `Unreachable` / `Timeout`
//! / `Engine` so callers see the failure kind, not the HTTP library's.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Top-level error for `model-engine`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ModelError {
    /// Configuration/validation errors (construction time).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The local runtime could not be reached at all.
    #[error("model engine unreachable at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request exceeded the configured timeout.
    #[error("model engine timed out after {0:?}")]
    Timeout(Duration),

    /// The engine answered, but with a failure.
    #[error(transparent)]
    Engine(#[from] EngineFailure),
}

/// Engine-side failures: the runtime was reachable but the exchange failed.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EngineFailure {
    /// Non-2xx HTTP status from the engine.
    #[error("HTTP {status} from {url}: {snippet}")]
    Status {
        status: StatusCode,
        url: String,
        /// Short prefix of the response body, for log attribution.
        snippet: String,
    },

    /// The response body could not be decoded as expected.
    #[error("failed to decode engine response: {0}")]
    Decode(String),
}

/// Errors raised while reading or validating the engine configuration.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but not a valid number.
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// The endpoint is empty or does not start with http/https.
    #[error("invalid endpoint {url:?}: must start with http:// or https://")]
    InvalidEndpoint { url: String },

    /// A sampling parameter is outside its allowed range.
    #[error("{field} out of range: {detail}")]
    OutOfRange {
        field: &'static str,
        detail: &'static str,
    },

    /// Model name was empty.
    #[error("model name must not be empty")]
    EmptyModel,
}

/// Classifies a transport error into the caller-facing taxonomy.
///
/// Timeouts become [`ModelError::Timeout`], connection failures become
/// [`ModelError::Unreachable`], anything else (broken body, protocol-level
/// trouble) is an engine-side [`EngineFailure::Decode`].
pub(crate) fn classify_transport(url: &str, timeout: Duration, err: reqwest::Error) -> ModelError {
    if err.is_timeout() {
        ModelError::Timeout(timeout)
    } else if err.is_connect() {
        ModelError::Unreachable {
            url: url.to_string(),
            source: err,
        }
    } else {
        EngineFailure::Decode(err.to_string()).into()
    }
}

/// Short body prefix for error messages, so logs stay single-line.
pub(crate) fn make_snippet(body: &str) -> String {
    body.chars().take(240).collect()
}
