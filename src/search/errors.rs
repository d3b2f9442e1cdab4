//! Error types for score search

use crate::annotate::AnnotateError;
use crate::pattern::PatternError;
use thiserror::Error;

/// Top-level search error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Pattern markup could not be compiled
    #[error("Pattern compilation failed: {0}")]
    Pattern(#[from] PatternError),

    /// The regex engine rejected the expression (malformed or too large)
    #[error("Invalid match expression: {0}")]
    InvalidExpression(String),

    /// Spans and score text disagree
    #[error("Annotation failed: {0}")]
    Annotate(#[from] AnnotateError),
}

/// Errors raised while importing score files
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is too long: {len} bytes (limit {limit})")]
    TooLarge { path: String, len: usize, limit: usize },
}
