//! Error types for ragtex

use thiserror::Error;

/// Result type alias using RagtexError
pub type Result<T> = std::result::Result<T, RagtexError>;

/// Error type alias for convenience
pub type Error = RagtexError;

/// Main error type for ragtex
#[derive(Debug, Error)]
pub enum RagtexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Failed to parse document {path}: {reason}")]
    DocumentParse { path: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl RagtexError {
    /// Build a document-scoped parse error for the given path
    pub fn document_parse(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::DocumentParse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
