//! Client for the local model engine (Ollama).
//!
//! The whole contract is: one prompt string in, one completion string out,
//! over the runtime's local HTTP API. Failures surface as a typed
//! [`ModelError`] (unreachable runtime, timeout, or engine-side failure)
//! so callers can report the kind instead of a transport detail.

pub mod telemetry;

mod config;
mod engine;
mod error;

pub use config::{DEFAULT_ENDPOINT, DEFAULT_MODEL, EngineConfig};
pub use engine::{HealthStatus, OllamaEngine};
pub use error::{ConfigError, EngineFailure, ModelError, Result};
