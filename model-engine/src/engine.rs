//! Thin client for the local Ollama runtime.
//!
//! Two endpoints cover the whole contract:
//! - `POST {endpoint}/api/generate` - non-streaming text generation
//! - `GET  {endpoint}/api/tags`     - installed models / reachability probe
//!
//! One prompt in, one completion out; no streaming, no multi-turn state.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::EngineConfig;
use crate::error::{EngineFailure, ModelError, Result, classify_transport, make_snippet};

/// Reachability snapshot produced by [`OllamaEngine::health`].
///
/// `check` never fails; any error is folded into `ok = false` with a short
/// message, which is what the driver surfaces to the user.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub endpoint: String,
    pub model: String,
    pub ok: bool,
    pub latency_ms: u128,
    pub message: String,
}

/// Client for a single configured model on a local Ollama runtime.
///
/// # Example
/// ```no_run
/// use model_engine::{EngineConfig, OllamaEngine};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), model_engine::ModelError> {
/// let engine = OllamaEngine::new(EngineConfig::default())?;
/// let text = engine.generate("Why is the sky blue?").await?;
/// println!("{text}");
/// # Ok(()) }
/// ```
pub struct OllamaEngine {
    client: reqwest::Client,
    cfg: EngineConfig,
    timeout: Duration,
    url_generate: String,
    url_tags: String,
}

impl OllamaEngine {
    /// Validates the config and builds the HTTP client.
    ///
    /// # Errors
    /// [`ModelError::Config`] for an invalid config, [`ModelError::Engine`]
    /// if the HTTP client cannot be built.
    pub fn new(cfg: EngineConfig) -> Result<Self> {
        cfg.validate()?;

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(60));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineFailure::Decode(e.to_string()))?;

        let base = cfg.endpoint.trim().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            timeout,
            url_generate: format!("{base}/api/generate"),
            url_tags: format!("{base}/api/tags"),
            cfg,
        })
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.cfg.model
    }

    /// Non-streaming generation: one prompt in, one completion out.
    ///
    /// # Errors
    /// [`ModelError::Unreachable`] / [`ModelError::Timeout`] for transport
    /// failures, [`ModelError::Engine`] for non-2xx statuses and
    /// undecodable bodies.
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_inner(None, prompt).await
    }

    /// Like [`OllamaEngine::generate`], with a system preamble steering the
    /// answer style.
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.generate_inner(Some(system), prompt).await
    }

    async fn generate_inner(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            model: &self.cfg.model,
            prompt,
            system,
            stream: false,
            options: GenerateOptions {
                temperature: self.cfg.temperature,
                top_p: self.cfg.top_p,
                num_predict: self.cfg.max_tokens,
            },
        };

        debug!(prompt_bytes = prompt.len(), "POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport(&self.url_generate, self.timeout, e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(EngineFailure::Status {
                status,
                url: self.url_generate.clone(),
                snippet: make_snippet(&text),
            }
            .into());
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            EngineFailure::Decode(format!("bad /api/generate body: {e}; is stream=false set?"))
        })?;
        Ok(out.response)
    }

    /// Names of the models installed on the runtime, via `/api/tags`.
    ///
    /// The application's model picker is fed from this list.
    ///
    /// # Errors
    /// Same taxonomy as [`OllamaEngine::generate`].
    #[instrument(skip_all)]
    pub async fn installed_models(&self) -> Result<Vec<String>> {
        debug!("GET {}", self.url_tags);
        let resp = self
            .client
            .get(&self.url_tags)
            .send()
            .await
            .map_err(|e| classify_transport(&self.url_tags, self.timeout, e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(EngineFailure::Status {
                status,
                url: self.url_tags.clone(),
                snippet: make_snippet(&text),
            }
            .into());
        }

        let tags: TagsResponse = resp
            .json()
            .await
            .map_err(|e| EngineFailure::Decode(format!("bad /api/tags body: {e}")))?;
        Ok(tags
            .models
            .unwrap_or_default()
            .into_iter()
            .map(|m| m.name)
            .collect())
    }

    /// Resilient reachability probe: never fails, reports whether the
    /// runtime answered and whether the configured model is installed.
    pub async fn health(&self) -> HealthStatus {
        let start = Instant::now();
        match self.installed_models().await {
            Ok(models) => {
                let latency = start.elapsed().as_millis();
                if models.iter().any(|m| m == &self.cfg.model) {
                    self.status(true, latency, "engine is up; model is installed")
                } else {
                    warn!(model = %self.cfg.model, "model not present in /api/tags");
                    self.status(false, latency, "engine is up, but model is not installed")
                }
            }
            Err(err) => {
                let latency = start.elapsed().as_millis();
                warn!(error = %err, "health probe failed");
                self.status(false, latency, err.to_string())
            }
        }
    }

    fn status(&self, ok: bool, latency_ms: u128, message: impl Into<String>) -> HealthStatus {
        HealthStatus {
            endpoint: self.cfg.endpoint.clone(),
            model: self.cfg.model.clone(),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/* HTTP payloads */

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Option<Vec<TagItem>>,
}

#[derive(Debug, Deserialize)]
struct TagItem {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_normalized() {
        let cfg = EngineConfig {
            endpoint: "http://127.0.0.1:11434/".into(),
            ..EngineConfig::default()
        };
        let engine = OllamaEngine::new(cfg).unwrap();
        assert_eq!(engine.url_generate, "http://127.0.0.1:11434/api/generate");
        assert_eq!(engine.url_tags, "http://127.0.0.1:11434/api/tags");
    }

    #[test]
    fn generate_request_serializes_without_empty_options() {
        let body = GenerateRequest {
            model: "m",
            prompt: "p",
            system: None,
            stream: false,
            options: GenerateOptions {
                temperature: Some(0.7),
                top_p: None,
                num_predict: None,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["stream"], false);
        assert!(json.get("system").is_none());
        assert!(json["options"].get("top_p").is_none());
        assert_eq!(json["options"]["temperature"], 0.7);
    }

    #[tokio::test]
    async fn unreachable_endpoint_maps_to_unreachable() {
        // Nothing listens on this port; connection must be refused.
        let cfg = EngineConfig {
            endpoint: "http://127.0.0.1:1".into(),
            timeout_secs: Some(2),
            ..EngineConfig::default()
        };
        let engine = OllamaEngine::new(cfg).unwrap();
        let err = engine.generate("hi").await.unwrap_err();
        assert!(matches!(
            err,
            ModelError::Unreachable { .. } | ModelError::Timeout(_)
        ));

        let health = engine.health().await;
        assert!(!health.ok);
    }
}
