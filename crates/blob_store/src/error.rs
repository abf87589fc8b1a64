use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("path is malformed or escapes the sandbox: {path}")]
    InvalidPath { path: String },

    #[error("not found: {path}")]
    NotFound { path: String },

    #[error("parent folder missing for: {path}")]
    ParentNotFound { path: String },

    #[error("a folder already has this name: {path}")]
    Conflict { path: String },

    #[error("folder already exists: {path}")]
    AlreadyExists { path: String },

    #[error("expected a folder at: {path}")]
    NotAFolder { path: String },

    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
