//! Renderer seam: the validator produces a [`ChartSpec`]; drawing it is an
//! external concern behind this trait.

use std::path::PathBuf;

use dataset_store::Table;
use thiserror::Error;

use crate::spec::ChartSpec;

/// Errors from a rendering backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure, carried as text.
    #[error("render backend error: {0}")]
    Backend(String),
}

/// Turns a validated spec plus the current table into a displayable
/// artifact, returning where it was written.
pub trait Renderer {
    fn render(&self, spec: &ChartSpec, table: &Table) -> Result<PathBuf, RenderError>;
}
