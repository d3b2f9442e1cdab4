//! Pattern API operations
//!
//! Compiling pattern markup and wrapping fragments into MEI documents.

use super::helpers::{js_error, to_json};
use crate::markup::wrap_pattern as wrap_fragment;
use crate::pattern::compile_markup;
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};
use wasm_bindgen::prelude::*;

// ============================================================================
// Compilation
// ============================================================================

/// Compile pattern markup to a JSON `CompiledPattern`
/// (`expression`, `canonical`, `diagnostics`)
pub fn compile_pattern_json(markup: &str) -> Result<String, String> {
    let compiled = compile_markup(markup).map_err(|e| {
        wasm_error!("Pattern compilation error: {}", e);
        e.to_string()
    })?;

    for diagnostic in &compiled.diagnostics {
        wasm_warn!("{}: {}", diagnostic.element, diagnostic.message);
    }
    wasm_log!("  Expression: {}", compiled.expression);

    to_json(&compiled, "JSON serialization error")
}

#[wasm_bindgen(js_name = compilePattern)]
pub fn compile_pattern(markup: &str) -> Result<String, JsValue> {
    wasm_info!("compilePattern called ({} bytes)", markup.len());
    compile_pattern_json(markup).map_err(js_error)
}

// ============================================================================
// Document wrapping
// ============================================================================

/// Place a pattern fragment in the MEI document template (for rendering)
pub fn wrap_pattern_document(fragment: &str) -> Result<String, String> {
    wrap_fragment(fragment).map_err(|e| {
        wasm_error!("Pattern template error: {}", e);
        e.to_string()
    })
}

#[wasm_bindgen(js_name = wrapPattern)]
pub fn wrap_pattern(fragment: &str) -> Result<String, JsValue> {
    wasm_info!("wrapPattern called ({} bytes)", fragment.len());
    wrap_pattern_document(fragment).map_err(js_error)
}
