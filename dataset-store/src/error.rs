//! Typed errors for dataset loading.

use std::path::PathBuf;

use thiserror::Error;

/// Why a `load` failed. A failed load never touches the previously held
/// table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist (or the path points at a directory).
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// The file exists but could not be parsed as delimited text with a
    /// header row.
    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// The file parsed but contains zero data rows.
    #[error("{path} contains no data rows")]
    Empty { path: PathBuf },
}

impl LoadError {
    pub(crate) fn parse(path: &std::path::Path, reason: impl Into<String>) -> Self {
        LoadError::Parse {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
