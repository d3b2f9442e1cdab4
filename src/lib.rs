//! Kern Search WASM Module
//!
//! Melodic pattern search over Humdrum `**kern` scores. Patterns are written
//! in MEI markup, compiled to a single match expression, located in score
//! text, and reported back as marked score lines.

pub mod annotate;
pub mod api;
pub mod diagnostics;
pub mod input;
pub mod markup;
pub mod pattern;
pub mod search;

// Re-export commonly used types
pub use annotate::{annotate, Annotation, AnnotateError, LineMap};
pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use input::PatternInput;
pub use pattern::{compile, compile_markup, CompiledExpression, CompiledPattern, PatternError, PatternNode};
pub use search::{locate, mark_score, Corpus, ExpressionCache, MatchSpan, ScanMode, SearchError, SearchSettings};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            api::helpers::log_warn(&format!("logger already initialized: {}", e));
        }
    }

    log::info!("Kern search WASM module initialized");
}
