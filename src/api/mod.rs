//! Kern Search WASM API
//!
//! This module provides the JavaScript-facing API for pattern search. Every
//! exported function delegates to a plain Rust function returning
//! `Result<String, String>`, so the logic runs and is tested natively.
//!
//! # Module Structure
//!
//! - `helpers`: Logging macros, JSON conversion and settings parsing
//! - `types`: JSON result shapes
//! - `pattern`: Pattern compilation and document wrapping
//! - `search`: Score marking, corpus ranking and voice splitting
//! - `input`: The keyboard pattern builder as a `PatternInput` class

pub mod helpers;
pub mod input;
pub mod pattern;
pub mod search;
pub mod types;

pub use input::PatternInputHandle;
pub use pattern::{compile_pattern, compile_pattern_json, wrap_pattern, wrap_pattern_document};
pub use search::{mark_score, mark_score_json, search_scores, search_scores_json, split_voices};
pub use types::{AnnotationResult, SearchResult};
