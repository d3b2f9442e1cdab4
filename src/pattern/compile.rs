//! Canonical pattern tree to match expression
//!
//! Each note lowers to one kern data record:
//!
//! ```text
//! (?:^|\t) [&({\[_]*  <duration> <pitch>  (?:[^a-gA-Gn#\n-].*)?\n  (?:[.!*=].*\n)*?
//! boundary  prefix                         guard + rest of record   skipped records
//! ```
//!
//! The guard rejects a record whose pitch token continues past the pattern's
//! pitch (so `cc` does not match inside `ccc` and `c` does not match `c#`).
//! It is the consuming form of `(?![a-gA-Gn#-]).*\n`, which matches the same
//! spans on engines without lookaround. Skipped records are comments,
//! barlines, interpretations and null records, consumed lazily between notes.

use super::model::{
    AccidentalSpec, DurationSpec, NoteSpec, PatternNode, PitchName, PitchSpec, Quantifier,
};
use crate::diagnostics::{Diagnostic, Diagnostics};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// FRAGMENTS
// ============================================================================

/// Start of a record or of a voice within it
pub const RECORD_BOUNDARY: &str = r"(?:^|\t)";

/// Optional elision, slur, phrase and tie markers ahead of the duration
pub const ORNAMENT_PREFIX: &str = r"[&({\[_]*";

/// Any explicit duration token, dotted or not
pub const ANY_DURATION: &str = r"[0-9]+\.*";

/// One pitch letter repeated, in either octave register
pub const ANY_PITCH: &str = r"(?:a+|b+|c+|d+|e+|f+|g+|A+|B+|C+|D+|E+|F+|G+)";

/// A run of sharps, a run of flats, or an explicit natural
pub const ANY_ACCIDENTAL: &str = r"(?:#*|-*|n)";

/// Pitch-token guard followed by the rest of the record
pub const TOKEN_END: &str = r"(?:[^a-gA-Gn#\n-].*)?";

/// Record separator
pub const NEWLINE: &str = r"\n";

/// Control and null records a match may step over
pub const SKIPPED_RECORDS: &str = r"(?:[.!*=].*\n)*?";

/// Alternation operator
pub const ALTERNATION: &str = "|";

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// Textual match expression produced by the compiler
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompiledExpression(String);

impl CompiledExpression {
    /// Wrap an expression produced elsewhere (e.g. stored by the host)
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of compiling a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledPattern {
    /// The match expression
    pub expression: CompiledExpression,

    /// Canonical string form of the normalized pattern
    pub canonical: String,

    /// Fallbacks applied during compilation
    pub diagnostics: Vec<Diagnostic>,
}

// ============================================================================
// LOWERING
// ============================================================================

/// Compile a canonical pattern tree
pub fn compile(tree: &PatternNode) -> CompiledPattern {
    let mut lowering = Lowering::default();
    let mut expression = String::new();
    lowering.lower(tree, &mut expression);

    let canonical = tree.to_string();
    log::debug!("compiled {} -> {}", canonical, expression);

    CompiledPattern {
        expression: CompiledExpression(expression),
        canonical,
        diagnostics: lowering.diagnostics.into_vec(),
    }
}

#[derive(Default)]
struct Lowering {
    diagnostics: Diagnostics,
}

impl Lowering {
    fn lower(&mut self, node: &PatternNode, out: &mut String) {
        match node {
            PatternNode::Note(note) => self.lower_note(note, out),
            PatternNode::Sequence(children) => self.lower_sequence(children, out),
            PatternNode::Alternation(branches) => {
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        out.push_str(ALTERNATION);
                    }
                    self.lower_sequence(branch, out);
                }
            }
            PatternNode::Group { children, bounds } => {
                let quantifier = bounds.quantifier().unwrap_or_else(|| {
                    self.diagnostics.add(Diagnostic::warning(
                        "unsupported_occurrences",
                        "query:group",
                        format!(
                            "min-occurrences={:?}, max-occurrences={:?} is not supported; matching zero or more",
                            bounds.min, bounds.max
                        ),
                    ));
                    Quantifier::ZeroOrMore
                });

                out.push('(');
                self.lower_sequence(children, out);
                out.push(')');
                out.push_str(quantifier.suffix());
            }
        }
    }

    fn lower_sequence(&mut self, children: &[PatternNode], out: &mut String) {
        for child in children {
            self.lower(child, out);
        }
    }

    fn lower_note(&mut self, note: &NoteSpec, out: &mut String) {
        out.push_str(RECORD_BOUNDARY);
        out.push_str(ORNAMENT_PREFIX);
        out.push_str(&duration_fragment(&note.duration));
        out.push_str(&self.pitch_fragment(&note.pitch));
        out.push_str(TOKEN_END);
        out.push_str(NEWLINE);
        out.push_str(SKIPPED_RECORDS);
    }

    fn pitch_fragment(&mut self, pitch: &PitchSpec) -> String {
        match *pitch {
            PitchSpec::Any => format!("{}{}", ANY_PITCH, ANY_ACCIDENTAL),
            PitchSpec::Exact {
                name,
                octave,
                accidental,
            } => {
                let mut fragment = kern_pitch_letters(name, octave);
                match accidental {
                    AccidentalSpec::Any => fragment.push_str(ANY_ACCIDENTAL),
                    AccidentalSpec::Exact(acc) => match acc.kern() {
                        Some(spelling) => fragment.push_str(&regex::escape(spelling)),
                        None => self.diagnostics.add(Diagnostic::warning(
                            "unspellable_accidental",
                            "note",
                            format!(
                                "accid=\"{}\" has no kern spelling; matching the unaltered pitch",
                                acc.mei_code().unwrap_or("")
                            ),
                        )),
                    },
                }
                fragment
            }
        }
    }
}

/// Duration fragment: explicit code plus one escaped dot per dot
fn duration_fragment(duration: &DurationSpec) -> String {
    match *duration {
        DurationSpec::Any => ANY_DURATION.to_string(),
        DurationSpec::Exact { code, dots } => {
            let mut fragment = regex::escape(&code.kern());
            for _ in 0..dots {
                fragment.push_str(&regex::escape("."));
            }
            fragment
        }
    }
}

/// Kern pitch letters: lowercase repeated `octave - 3` times from octave 4
/// up, uppercase repeated `4 - octave` times below it
pub fn kern_pitch_letters(name: PitchName, octave: i8) -> String {
    let octave = i32::from(octave);
    let letter = name.letter();

    if octave >= 4 {
        std::iter::repeat(letter)
            .take((octave - 3) as usize)
            .collect()
    } else {
        std::iter::repeat(letter.to_ascii_uppercase())
            .take((4 - octave) as usize)
            .collect()
    }
}
