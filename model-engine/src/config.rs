//! Engine configuration, read from the environment with typed defaults.

use crate::error::{ConfigError, Result};

/// Default local Ollama endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:11434";

/// Default chat model, matching the application's shipped model list.
pub const DEFAULT_MODEL: &str = "deepseek-r1:7b";

/// Configuration for the local model engine.
///
/// # Example
/// ```
/// use model_engine::EngineConfig;
///
/// let cfg = EngineConfig {
///     temperature: Some(0.2),
///     ..EngineConfig::default()
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Model identifier (e.g. `deepseek-r1:7b`, `codellama:7b`).
    pub model: String,
    /// Base URL of the local runtime.
    pub endpoint: String,
    /// Maximum number of tokens to generate (`num_predict`).
    pub max_tokens: Option<u32>,
    /// Sampling temperature, `0.0..=2.0`.
    pub temperature: Option<f32>,
    /// Nucleus sampling cutoff, `0.0..=1.0`.
    pub top_p: Option<f32>,
    /// Request timeout in seconds; defaults to 60 in the engine.
    pub timeout_secs: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_tokens: None,
            temperature: Some(0.7),
            top_p: None,
            timeout_secs: Some(60),
        }
    }
}

impl EngineConfig {
    /// Builds a config from environment variables, falling back to the
    /// defaults above: `OLLAMA_URL`, `OLLAMA_MODEL`, `LLM_MAX_TOKENS`,
    /// `LLM_TEMPERATURE`, `LLM_TOP_P`, `LLM_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// [`crate::ModelError::Config`] when a set variable fails to parse or
    /// the resulting config fails [`EngineConfig::validate`].
    pub fn from_env() -> Result<Self> {
        let cfg = Self {
            model: env_or("OLLAMA_MODEL", DEFAULT_MODEL),
            endpoint: env_or("OLLAMA_URL", DEFAULT_ENDPOINT),
            max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
            temperature: env_opt_f32("LLM_TEMPERATURE")?.or(Some(0.7)),
            top_p: env_opt_f32("LLM_TOP_P")?,
            timeout_secs: env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(60)),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates endpoint scheme, model name and sampling parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ConfigError::InvalidEndpoint {
                url: self.endpoint.clone(),
            }
            .into());
        }
        if let Some(t) = self.temperature {
            check_range("temperature", t, 0.0, 2.0)?;
        }
        if let Some(p) = self.top_p {
            check_range("top_p", p, 0.0, 1.0)?;
        }
        Ok(())
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected a finite value in the inclusive range",
        }
        .into())
    }
}

fn env_or(name: &str, dflt: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => dflt.to_string(),
    }
}

fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    parse_opt(name, "expected u32")
}

fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    parse_opt(name, "expected u64")
}

fn env_opt_f32(name: &'static str) -> Result<Option<f32>> {
    parse_opt(name, "expected f32")
}

fn parse_opt<T: std::str::FromStr>(name: &'static str, reason: &'static str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var: name, reason }.into()),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    #[test]
    fn default_config_validates() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_endpoint() {
        let cfg = EngineConfig {
            endpoint: "localhost:11434".into(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ModelError::Config(ConfigError::InvalidEndpoint { .. }))
        ));
    }

    #[test]
    fn rejects_empty_model() {
        let cfg = EngineConfig {
            model: "  ".into(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ModelError::Config(ConfigError::EmptyModel))
        ));
    }

    #[test]
    fn rejects_out_of_range_sampling() {
        let cfg = EngineConfig {
            temperature: Some(3.5),
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = EngineConfig {
            top_p: Some(-0.1),
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
