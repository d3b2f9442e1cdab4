//! Shared helpers for WASM API operations
//!
//! Logging macros, JSON and JsValue conversion, and settings parsing used by
//! every API function.

use crate::search::SearchSettings;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================================================
// Console Logging Functions
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

// ============================================================================
// Logging Helper Functions (called by macros)
// ============================================================================

// Console imports only exist inside a JS host; native builds go through `log`.

#[cfg(target_arch = "wasm32")]
pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

#[cfg(target_arch = "wasm32")]
pub fn log_info(msg: &str) {
    info(&format!("[WASM] {}", msg));
}

#[cfg(target_arch = "wasm32")]
pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

#[cfg(target_arch = "wasm32")]
pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_debug(msg: &str) {
    log::debug!("{}", msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_info(msg: &str) {
    log::info!("{}", msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_warn(msg: &str) {
    log::warn!("{}", msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_error(msg: &str) {
    log::error!("{}", msg);
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Serialize a value to a JSON string, logging failures
pub fn to_json<T: Serialize>(value: &T, error_context: &str) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        msg
    })
}

/// Deserialize a JSON string, logging failures
pub fn from_json<T: DeserializeOwned>(json: &str, error_context: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        msg
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Search settings from optional host JSON; absent or blank means defaults
pub fn parse_settings(settings_json: Option<&str>) -> Result<SearchSettings, String> {
    match settings_json.map(str::trim) {
        None | Some("") => Ok(SearchSettings::default()),
        Some(json) => SearchSettings::from_json(json).map_err(|e| {
            let msg = format!("Invalid search settings: {}", e);
            log_error(&msg);
            msg
        }),
    }
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Convert an error message to a JsValue
pub fn js_error(msg: impl Into<String>) -> JsValue {
    JsValue::from_str(&msg.into())
}
