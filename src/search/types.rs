//! Type definitions for score search
//!
//! - Match spans produced by the locator
//! - Search settings supplied by the host
//! - Ranked search hits

use crate::annotate::DEFAULT_MARKER;
use serde::{Deserialize, Serialize};

// ============================================================================
// MATCH SPANS
// ============================================================================

/// Byte range of one match in the score text (end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The matched slice of `text`, if the span lies on char boundaries
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

/// What text a score is matched against when counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// The score text as stored
    Whole,
    /// Each `**kern` spine separately, counts summed
    Voices,
}

/// Configuration options for search and annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Marker appended to matched records
    pub marker: char,

    /// Scan mode used for corpus match counts
    pub scan_mode: ScanMode,

    /// Whether marked output carries the `!!!RDF**kern` marker legend
    pub rdf_legend: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            scan_mode: ScanMode::Voices,
            rdf_legend: true,
        }
    }
}

impl SearchSettings {
    /// Parse settings JSON from the host; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// A score with at least one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u32,
    pub title: String,
    pub match_count: usize,
}
