//! Prompt composition and the ask gateway.
//!
//! Public surface: [`compose`] (pure: question plus optional budgeted
//! table excerpt in, [`PromptPayload`] out, never fails) and [`ask`] /
//! [`ask_with_opts`], which run the end-to-end pipeline: load config,
//! compose against the dataset store's current table, call the local model
//! engine, and return the answer with the context flags.

mod api_types;
mod cfg;
mod error;
mod progress;
mod prompt;

pub use api_types::{Answer, AskOptions};
pub use cfg::{DEFAULT_CONTEXT_BUDGET, TableTalkConfig};
pub use error::AskError;
pub use progress::{NoopProgress, Progress, SpinnerProgress};
pub use prompt::{
    DEFAULT_SYSTEM, FIELD_DELIMITER, PromptPayload, TRUNCATION_MARKER, compose,
};

use dataset_store::DatasetStore;
use model_engine::OllamaEngine;
use tracing::{debug, info};

/// Asks the model with defaults from the environment and no progress UI.
///
/// # Example
/// ```no_run
/// use dataset_store::DatasetStore;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), prompt_composer::AskError> {
/// let mut store = DatasetStore::new();
/// store.load("sales.csv".as_ref()).ok();
/// let answer = prompt_composer::ask("what is the trend?", &store).await?;
/// println!("{}", answer.text);
/// # Ok(()) }
/// ```
pub async fn ask(question: &str, store: &DatasetStore) -> Result<Answer, AskError> {
    ask_with_opts(question, store, AskOptions::default(), &NoopProgress).await
}

/// Asks the model with per-question overrides and a progress reporter.
///
/// Stages: config, compose, engine construction, completion. No retries;
/// every failure is returned to the caller with its kind.
///
/// # Errors
/// [`AskError::EmptyQuestion`] for a blank question, [`AskError::Model`]
/// for anything engine-side.
pub async fn ask_with_opts(
    question: &str,
    store: &DatasetStore,
    opts: AskOptions,
    progress: &dyn Progress,
) -> Result<Answer, AskError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AskError::EmptyQuestion);
    }

    progress.message("loading config");
    let cfg = TableTalkConfig::from_env()?;
    let include_context = opts.include_context.unwrap_or(cfg.include_context);
    let budget = opts.budget_bytes.unwrap_or(cfg.context_budget_bytes);

    progress.step("composing prompt");
    let table = if include_context {
        store.current_table()
    } else {
        None
    };
    let payload = compose(question, table.as_deref(), budget);
    debug!(
        context_included = payload.context_block().is_some(),
        truncated = payload.truncated(),
        omitted = payload.context_omitted(),
        budget,
        "prompt composed"
    );

    progress.step("starting model engine");
    let engine = OllamaEngine::new(cfg.engine)?;

    progress.step("waiting for completion");
    let text = engine
        .generate_with_system(DEFAULT_SYSTEM, &payload.render())
        .await?;
    progress.finish("done");

    info!(model = engine.model(), answer_bytes = text.len(), "ask complete");
    Ok(Answer {
        text,
        context_included: payload.context_block().is_some(),
        truncated: payload.truncated(),
        context_omitted: payload.context_omitted(),
    })
}
