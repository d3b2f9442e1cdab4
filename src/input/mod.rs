//! Keyboard pattern builder
//!
//! An immutable list of notes edited one keystroke at a time. Every operation
//! returns a new value; operations that need a selected note return an
//! unchanged copy when nothing is selected. [`PatternInput::to_mei`] writes
//! the notes as MEI pattern markup ready for the compiler.

use crate::pattern::{Accidental, PitchName};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Durations the builder offers
pub const DURATIONS: [u32; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

/// Duration of new notes until changed
pub const DEFAULT_DURATION: u32 = 4;

/// Octave of new notes until changed
pub const DEFAULT_OCTAVE: i8 = 4;

/// Highlight colour of the selected note
pub const SELECTED_COLOR: &str = "red";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Unsupported duration {0} (expected one of 1, 2, 4, ... 128)")]
    UnsupportedDuration(u32),

    #[error("Failed to write MEI: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("MEI output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// One entered note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputNote {
    pub pitch: PitchName,
    pub octave: i8,
    pub duration: u32,
    pub dotted: bool,
    /// Only `Sharp` and `Flat` are entered from the keyboard
    pub accidental: Option<Accidental>,
}

/// Builder state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternInput {
    selected_duration: u32,
    dotted_mode: bool,
    selected_octave: i8,
    notes: Vec<InputNote>,
    selected_index: Option<usize>,
}

impl Default for PatternInput {
    fn default() -> Self {
        Self {
            selected_duration: DEFAULT_DURATION,
            dotted_mode: false,
            selected_octave: DEFAULT_OCTAVE,
            notes: Vec::new(),
            selected_index: None,
        }
    }
}

impl PatternInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[InputNote] {
        &self.notes
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_duration(&self) -> u32 {
        self.selected_duration
    }

    pub fn selected_octave(&self) -> i8 {
        self.selected_octave
    }

    pub fn is_dotted_mode(&self) -> bool {
        self.dotted_mode
    }

    pub fn selected_note(&self) -> Option<&InputNote> {
        self.selected_index.and_then(|i| self.notes.get(i))
    }

    // ------------------------------------------------------------------------
    // Entry settings
    // ------------------------------------------------------------------------

    pub fn set_selected_duration(&self, duration: u32) -> Result<Self, InputError> {
        if !DURATIONS.contains(&duration) {
            return Err(InputError::UnsupportedDuration(duration));
        }
        Ok(Self {
            selected_duration: duration,
            ..self.clone()
        })
    }

    pub fn toggle_dotted_mode(&self) -> Self {
        Self {
            dotted_mode: !self.dotted_mode,
            ..self.clone()
        }
    }

    // ------------------------------------------------------------------------
    // Notes and selection
    // ------------------------------------------------------------------------

    /// Append a note with the current entry settings and select it
    pub fn add_note(&self, pitch: PitchName) -> Self {
        let mut next = self.clone();
        next.notes.push(InputNote {
            pitch,
            octave: self.selected_octave,
            duration: self.selected_duration,
            dotted: self.dotted_mode,
            accidental: None,
        });
        next.selected_index = Some(next.notes.len() - 1);
        next
    }

    /// Delete the selected note; the previous note becomes selected
    /// (the new first note when the first was deleted)
    pub fn delete_selected_note(&self) -> Self {
        let Some(index) = self.selected_index else {
            return self.clone();
        };
        let mut next = self.clone();
        if index < next.notes.len() {
            next.notes.remove(index);
        }
        next.selected_index = match index {
            0 if next.notes.is_empty() => None,
            0 => Some(0),
            i => Some(i - 1),
        };
        next
    }

    pub fn select_next_note(&self) -> Self {
        match self.selected_index {
            Some(i) if i + 1 < self.notes.len() => Self {
                selected_index: Some(i + 1),
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    pub fn select_previous_note(&self) -> Self {
        match self.selected_index {
            Some(i) if i > 0 => Self {
                selected_index: Some(i - 1),
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    // ------------------------------------------------------------------------
    // Editing the selected note
    // ------------------------------------------------------------------------

    fn with_selected(&self, edit: impl FnOnce(&mut InputNote)) -> Self {
        let mut next = self.clone();
        if let Some(note) = next.selected_index.and_then(|i| next.notes.get_mut(i)) {
            edit(note);
        }
        next
    }

    /// Set the selected note's octave; new notes follow it
    fn change_selected_octave(&self, octave: i8) -> Self {
        if self.selected_note().is_none() {
            return self.clone();
        }
        let mut next = self.with_selected(|note| note.octave = octave);
        next.selected_octave = octave;
        next
    }

    pub fn increment_selected_note_octave(&self) -> Self {
        self.change_selected_octave(self.selected_octave.saturating_add(1))
    }

    pub fn decrement_selected_note_octave(&self) -> Self {
        self.change_selected_octave(self.selected_octave.saturating_sub(1))
    }

    /// Raise the selected note by one letter; b -> c moves up an octave
    pub fn move_selected_note_up(&self) -> Self {
        let Some(note) = self.selected_note() else {
            return self.clone();
        };
        let pitch = note.pitch.step_up();
        let next = self.with_selected(|note| note.pitch = pitch);
        if pitch == PitchName::C {
            next.increment_selected_note_octave()
        } else {
            next
        }
    }

    /// Lower the selected note by one letter; c -> b moves down an octave
    pub fn move_selected_note_down(&self) -> Self {
        let Some(note) = self.selected_note() else {
            return self.clone();
        };
        let pitch = note.pitch.step_down();
        let next = self.with_selected(|note| note.pitch = pitch);
        if pitch == PitchName::B {
            next.decrement_selected_note_octave()
        } else {
            next
        }
    }

    fn toggle_selected_accidental(&self, accidental: Accidental) -> Self {
        self.with_selected(|note| {
            note.accidental = if note.accidental == Some(accidental) {
                None
            } else {
                Some(accidental)
            };
        })
    }

    pub fn toggle_selected_note_sharp(&self) -> Self {
        self.toggle_selected_accidental(Accidental::Sharp)
    }

    pub fn toggle_selected_note_flat(&self) -> Self {
        self.toggle_selected_accidental(Accidental::Flat)
    }

    // ------------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------------

    /// MEI pattern fragment, one `<note/>` per entered note
    pub fn to_mei(&self) -> Result<String, InputError> {
        let mut writer = Writer::new(Vec::new());

        for (index, note) in self.notes.iter().enumerate() {
            let pname = note.pitch.letter().to_string();
            let dur = note.duration.to_string();
            let oct = note.octave.to_string();

            let mut element = BytesStart::new("note");
            element.push_attribute(("pname", pname.as_str()));
            element.push_attribute(("dur", dur.as_str()));
            element.push_attribute(("oct", oct.as_str()));
            if note.dotted {
                element.push_attribute(("dots", "1"));
            }
            if let Some(code) = note.accidental.and_then(Accidental::mei_code) {
                element.push_attribute(("accid", code));
            }
            if self.selected_index == Some(index) {
                element.push_attribute(("color", SELECTED_COLOR));
            }

            writer.write_event(Event::Empty(element))?;
        }

        Ok(String::from_utf8(writer.into_inner())?)
    }
}
