//! Shared types for the WASM API
//!
//! Result shapes returned to JavaScript as JSON.

use crate::search::SearchHit;

/// Result of marking a score
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AnnotationResult {
    pub marked_text: String,        // Marked score, with legend when enabled
    pub touched_lines: Vec<usize>,  // 0-based, ascending
    pub match_count: usize,
}

/// Result of a corpus search
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub expression: String,
    pub hits: Vec<SearchHit>,
}
