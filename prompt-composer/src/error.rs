//! Typed error for the ask pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AskError {
    /// The question was empty after trimming. Callers should reject this
    /// before reaching the pipeline; the guard here keeps the contract.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// Engine-side failure: configuration, transport, or completion.
    #[error(transparent)]
    Model(#[from] model_engine::ModelError),
}
