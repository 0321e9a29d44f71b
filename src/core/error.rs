//! Boundary errors
//!
//! The indexing engine itself cannot fail. These errors belong to the
//! loaders and config parsing that sit in front of it.

use thiserror::Error;

/// Failure while decoding or validating a result list
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read results: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}:{line}: span {start}..{end} is outside content of length {len}")]
    InvalidSpan {
        path: String,
        line: u64,
        start: u64,
        end: u64,
        len: u64,
    },

    #[error("{path}: line numbers start at 1")]
    InvalidLine { path: String },
}

impl LoadError {
    /// Stable code used when the error is emitted as an output item
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Io(_) => "IO_ERROR",
            LoadError::Json { .. } => "INVALID_JSON",
            LoadError::InvalidSpan { .. } => "INVALID_SPAN",
            LoadError::InvalidLine { .. } => "INVALID_LINE",
        }
    }
}

/// Invalid engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    #[error("invalid page size '{0}'")]
    InvalidPageSize(String),
}
