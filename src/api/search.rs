//! Score API operations
//!
//! Marking matches in a single score, ranking a corpus, and splitting voices.

use super::helpers::{from_json, js_error, parse_settings, serialize, to_json};
use super::types::{AnnotationResult, SearchResult};
use crate::annotate::annotate;
use crate::pattern::{compile_markup, CompiledExpression};
use crate::search::{self, locate, Corpus, Score};
use crate::{wasm_error, wasm_info, wasm_log};
use wasm_bindgen::prelude::*;

// ============================================================================
// Marking
// ============================================================================

/// Locate `expression` in `kern` and mark the touched records
pub fn mark_score_json(
    kern: &str,
    expression: &str,
    settings_json: Option<&str>,
) -> Result<String, String> {
    let settings = parse_settings(settings_json)?;
    let expression = CompiledExpression::new(expression);

    let spans = locate(kern, &expression).map_err(|e| {
        wasm_error!("Match error: {}", e);
        e.to_string()
    })?;
    let annotation = annotate(kern, &spans, settings.marker).map_err(|e| {
        wasm_error!("Annotation error: {}", e);
        e.to_string()
    })?;

    wasm_log!("  {} matches over {} lines", spans.len(), annotation.touched.len());

    let marked_text = if settings.rdf_legend {
        annotation.to_humdrum()
    } else {
        annotation.marked_text()
    };

    to_json(
        &AnnotationResult {
            marked_text,
            touched_lines: annotation.touched_lines(),
            match_count: spans.len(),
        },
        "JSON serialization error",
    )
}

#[wasm_bindgen(js_name = markScore)]
pub fn mark_score(
    kern: &str,
    expression: &str,
    settings_json: Option<String>,
) -> Result<String, JsValue> {
    wasm_info!("markScore called ({} bytes of kern)", kern.len());
    mark_score_json(kern, expression, settings_json.as_deref()).map_err(js_error)
}

// ============================================================================
// Corpus search
// ============================================================================

/// Compile `markup` and rank the scores in `scores_json` by match count
pub fn search_scores_json(
    markup: &str,
    scores_json: &str,
    settings_json: Option<&str>,
) -> Result<String, String> {
    let settings = parse_settings(settings_json)?;
    let scores: Vec<Score> = from_json(scores_json, "Invalid score list")?;
    let corpus = Corpus::from_scores(scores);

    let compiled = compile_markup(markup).map_err(|e| {
        wasm_error!("Pattern compilation error: {}", e);
        e.to_string()
    })?;
    let hits = corpus
        .search(&compiled.expression, settings.scan_mode)
        .map_err(|e| {
            wasm_error!("Search error: {}", e);
            e.to_string()
        })?;

    wasm_log!("  {} of {} scores matched", hits.len(), corpus.len());

    to_json(
        &SearchResult {
            expression: compiled.expression.into_string(),
            hits,
        },
        "JSON serialization error",
    )
}

#[wasm_bindgen(js_name = searchScores)]
pub fn search_scores(
    markup: &str,
    scores_json: &str,
    settings_json: Option<String>,
) -> Result<String, JsValue> {
    wasm_info!("searchScores called");
    search_scores_json(markup, scores_json, settings_json.as_deref()).map_err(js_error)
}

// ============================================================================
// Voices
// ============================================================================

/// Split a score into its `**kern` spines (JS array of strings)
#[wasm_bindgen(js_name = splitVoices)]
pub fn split_voices(kern: &str) -> Result<JsValue, JsValue> {
    wasm_info!("splitVoices called ({} bytes)", kern.len());
    let voices = search::split_voices(kern);
    wasm_log!("  {} kern voices", voices.len());
    serialize(&voices, "Voice serialization error")
}
