//! MEI pattern markup
//!
//! Patterns arrive either as a bare fragment (`<note .../><note .../>`) or as
//! a complete MEI document. Fragments are placed into a fixed single-staff,
//! single-layer document template before parsing, so the normalizer always
//! finds the pattern container at the same path.
//!
//! - `parser`: roxmltree wrapper for reading the pattern container and
//!   element attributes

pub mod parser;

use crate::pattern::PatternError;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Namespace of the `query:` wildcard and grouping vocabulary
pub const QUERY_NAMESPACE: &str = "http://www.matangover.com/musicquery";

/// Namespace of MEI elements
pub const MEI_NAMESPACE: &str = "http://www.music-encoding.org/ns/mei";

/// Element path from the document root to the pattern container
pub const CONTAINER_PATH: [&str; 9] = [
    "mei", "music", "body", "mdiv", "score", "section", "measure", "staff", "layer",
];

static PATTERN_TEMPLATE: Lazy<Result<mustache::Template, String>> = Lazy::new(|| {
    mustache::compile_str(include_str!("templates/pattern.mei.mustache")).map_err(|e| e.to_string())
});

/// Context data for the document template
#[derive(Debug, Clone, Serialize)]
struct TemplateContext<'a> {
    query_namespace: &'a str,
    pattern: &'a str,
}

/// Whether the input is already a complete document rather than a fragment
pub fn is_full_document(markup: &str) -> bool {
    let trimmed = markup.trim_start();
    trimmed.starts_with("<?xml") || trimmed.starts_with("<mei")
}

/// Place a pattern fragment into the MEI document template
pub fn wrap_pattern(fragment: &str) -> Result<String, PatternError> {
    let template = PATTERN_TEMPLATE
        .as_ref()
        .map_err(|e| PatternError::Template(e.clone()))?;

    let context = TemplateContext {
        query_namespace: QUERY_NAMESPACE,
        pattern: fragment,
    };

    template
        .render_to_string(&context)
        .map_err(|e| PatternError::Template(e.to_string()))
}

/// Wrap the input unless it is already a complete document
pub fn to_document(markup: &str) -> Result<String, PatternError> {
    if is_full_document(markup) {
        Ok(markup.to_string())
    } else {
        wrap_pattern(markup)
    }
}
