//! Error types for pattern compilation
//!
//! Every variant is fatal for the request: no partial expression is returned.
//! Recoverable problems are reported as diagnostics instead
//! (see [`crate::diagnostics`]).

use thiserror::Error;

/// Errors raised while turning pattern markup into a match expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Markup is not well-formed XML
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    /// An element carries an attribute value the compiler cannot use
    #[error("Malformed <{element}>: attribute '{attribute}'={value:?} {reason}")]
    MalformedPattern {
        element: String,
        attribute: String,
        value: String,
        reason: String,
    },

    /// An element has no lowering rule
    #[error("Unknown pattern element <{tag}>")]
    UnknownTag { tag: String },

    /// The document does not contain exactly one pattern container
    #[error("Expected exactly one pattern container, found {found}")]
    Structure { found: usize },

    /// The pattern holds no notes
    #[error("Pattern is empty")]
    EmptyPattern,

    /// The document template failed to render
    #[error("Template error: {0}")]
    Template(String),
}

impl PatternError {
    pub(crate) fn malformed(
        element: &str,
        attribute: &str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PatternError::MalformedPattern {
            element: element.to_string(),
            attribute: attribute.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
