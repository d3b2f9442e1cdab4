//! Pattern builder API
//!
//! Exposes the keyboard pattern builder to JavaScript as a `PatternInput`
//! class. The builder itself is immutable; the handle holds the current value
//! and replaces it after every operation.

use super::helpers::{js_error, to_json};
use crate::input::PatternInput;
use crate::pattern::PitchName;
use crate::{wasm_error, wasm_info, wasm_log};
use wasm_bindgen::prelude::*;

// ============================================================================
// Native operations
// ============================================================================

/// Parse a note letter (`c` through `b`, either case)
pub fn parse_letter(letter: &str) -> Result<PitchName, String> {
    PitchName::from_letter(letter).ok_or_else(|| {
        wasm_error!("Invalid note letter: {:?}", letter);
        format!("Invalid note letter: {:?}", letter)
    })
}

/// Add a note named by `letter`
pub fn add_note_letter(input: &PatternInput, letter: &str) -> Result<PatternInput, String> {
    Ok(input.add_note(parse_letter(letter)?))
}

/// Change the duration used for new notes
pub fn select_duration(input: &PatternInput, duration: u32) -> Result<PatternInput, String> {
    input.set_selected_duration(duration).map_err(|e| {
        wasm_error!("Duration error: {}", e);
        e.to_string()
    })
}

/// Write the builder's notes as MEI pattern markup
pub fn input_to_mei(input: &PatternInput) -> Result<String, String> {
    let mei = input.to_mei().map_err(|e| {
        wasm_error!("MEI export error: {}", e);
        e.to_string()
    })?;
    wasm_log!("  {} notes, {} bytes of MEI", input.notes().len(), mei.len());
    Ok(mei)
}

// ============================================================================
// JavaScript class
// ============================================================================

#[wasm_bindgen(js_name = PatternInput)]
#[derive(Debug, Clone, Default)]
pub struct PatternInputHandle {
    inner: PatternInput,
}

#[wasm_bindgen(js_class = PatternInput)]
impl PatternInputHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(js_name = addNote)]
    pub fn add_note(&mut self, letter: &str) -> Result<(), JsValue> {
        wasm_info!("addNote called ({})", letter);
        self.inner = add_note_letter(&self.inner, letter).map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = deleteSelectedNote)]
    pub fn delete_selected_note(&mut self) {
        self.inner = self.inner.delete_selected_note();
    }

    #[wasm_bindgen(js_name = selectNextNote)]
    pub fn select_next_note(&mut self) {
        self.inner = self.inner.select_next_note();
    }

    #[wasm_bindgen(js_name = selectPreviousNote)]
    pub fn select_previous_note(&mut self) {
        self.inner = self.inner.select_previous_note();
    }

    #[wasm_bindgen(js_name = setSelectedDuration)]
    pub fn set_selected_duration(&mut self, duration: u32) -> Result<(), JsValue> {
        wasm_info!("setSelectedDuration called ({})", duration);
        self.inner = select_duration(&self.inner, duration).map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleDottedMode)]
    pub fn toggle_dotted_mode(&mut self) {
        self.inner = self.inner.toggle_dotted_mode();
    }

    #[wasm_bindgen(js_name = incrementSelectedNoteOctave)]
    pub fn increment_selected_note_octave(&mut self) {
        self.inner = self.inner.increment_selected_note_octave();
    }

    #[wasm_bindgen(js_name = decrementSelectedNoteOctave)]
    pub fn decrement_selected_note_octave(&mut self) {
        self.inner = self.inner.decrement_selected_note_octave();
    }

    #[wasm_bindgen(js_name = moveSelectedNoteUp)]
    pub fn move_selected_note_up(&mut self) {
        self.inner = self.inner.move_selected_note_up();
    }

    #[wasm_bindgen(js_name = moveSelectedNoteDown)]
    pub fn move_selected_note_down(&mut self) {
        self.inner = self.inner.move_selected_note_down();
    }

    #[wasm_bindgen(js_name = toggleSelectedNoteSharp)]
    pub fn toggle_selected_note_sharp(&mut self) {
        self.inner = self.inner.toggle_selected_note_sharp();
    }

    #[wasm_bindgen(js_name = toggleSelectedNoteFlat)]
    pub fn toggle_selected_note_flat(&mut self) {
        self.inner = self.inner.toggle_selected_note_flat();
    }

    /// MEI pattern markup, ready for `compilePattern`
    #[wasm_bindgen(js_name = toMei)]
    pub fn to_mei(&self) -> Result<String, JsValue> {
        wasm_info!("toMei called");
        input_to_mei(&self.inner).map_err(js_error)
    }

    /// Builder state as JSON, for rendering the note list
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        to_json(&self.inner, "JSON serialization error").map_err(js_error)
    }
}

impl PatternInputHandle {
    pub fn input(&self) -> &PatternInput {
        &self.inner
    }
}
