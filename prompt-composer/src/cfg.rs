//! Runtime configuration for the ask pipeline, loaded from the environment.

use model_engine::EngineConfig;

use crate::error::AskError;

/// Default byte budget for the context block. Configurable on purpose:
/// the right value depends on the model's context window.
pub const DEFAULT_CONTEXT_BUDGET: usize = 8192;

/// Config bag for the ask pipeline.
#[derive(Clone, Debug)]
pub struct TableTalkConfig {
    /// Engine connection and sampling parameters.
    pub engine: EngineConfig,
    /// Byte budget for the serialized table excerpt (`CONTEXT_BUDGET_BYTES`).
    pub context_budget_bytes: usize,
    /// Whether `ask` grounds the prompt in the loaded table by default
    /// (`INCLUDE_CONTEXT`).
    pub include_context: bool,
}

impl TableTalkConfig {
    /// Builds the config from environment variables with defaults.
    ///
    /// # Errors
    /// Propagates engine config validation failures as [`AskError::Model`].
    pub fn from_env() -> Result<Self, AskError> {
        Ok(Self {
            engine: EngineConfig::from_env()?,
            context_budget_bytes: parse("CONTEXT_BUDGET_BYTES", DEFAULT_CONTEXT_BUDGET),
            include_context: env("INCLUDE_CONTEXT", "true") != "false",
        })
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k).unwrap_or_else(|_| dflt.to_string())
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}
