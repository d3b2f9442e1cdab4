//! Canonical pattern tree
//!
//! The normalizer produces these types from MEI markup; the compiler lowers
//! them to a match expression. Wildcards are expressed in the types
//! themselves: a wildcard pitch has no letter, octave or accidental to read,
//! and a wildcard duration has no code or dots.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// PITCH
// ============================================================================

/// Diatonic pitch letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl PitchName {
    /// Letters in ascending order within an octave (c is the octave boundary)
    pub const ASCENDING: [PitchName; 7] = [
        PitchName::C,
        PitchName::D,
        PitchName::E,
        PitchName::F,
        PitchName::G,
        PitchName::A,
        PitchName::B,
    ];

    /// Parse an MEI `pname` value (case-insensitive)
    pub fn from_letter(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" => Some(PitchName::C),
            "d" => Some(PitchName::D),
            "e" => Some(PitchName::E),
            "f" => Some(PitchName::F),
            "g" => Some(PitchName::G),
            "a" => Some(PitchName::A),
            "b" => Some(PitchName::B),
            _ => None,
        }
    }

    /// Lowercase letter
    pub fn letter(self) -> char {
        match self {
            PitchName::C => 'c',
            PitchName::D => 'd',
            PitchName::E => 'e',
            PitchName::F => 'f',
            PitchName::G => 'g',
            PitchName::A => 'a',
            PitchName::B => 'b',
        }
    }

    fn position(self) -> usize {
        PitchName::ASCENDING
            .iter()
            .position(|p| *p == self)
            .unwrap_or(0)
    }

    /// Next letter up, wrapping b -> c
    pub fn step_up(self) -> Self {
        PitchName::ASCENDING[(self.position() + 1) % 7]
    }

    /// Next letter down, wrapping c -> b
    pub fn step_down(self) -> Self {
        PitchName::ASCENDING[(self.position() + 6) % 7]
    }
}

/// Accidental as written in MEI `accid`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accidental {
    None,
    Sharp,
    Flat,
    Natural,
    DoubleSharp,
    DoubleFlat,
    QuarterSharp,
}

impl Default for Accidental {
    fn default() -> Self {
        Accidental::None
    }
}

impl Accidental {
    /// Parse an MEI `accid` value
    pub fn from_mei(s: &str) -> Option<Self> {
        match s.trim() {
            "" => Some(Accidental::None),
            "s" => Some(Accidental::Sharp),
            "f" => Some(Accidental::Flat),
            "n" => Some(Accidental::Natural),
            "x" | "ss" => Some(Accidental::DoubleSharp),
            "ff" => Some(Accidental::DoubleFlat),
            "1qs" => Some(Accidental::QuarterSharp),
            _ => None,
        }
    }

    /// MEI `accid` value, `None` when no attribute is written
    pub fn mei_code(self) -> Option<&'static str> {
        match self {
            Accidental::None => None,
            Accidental::Sharp => Some("s"),
            Accidental::Flat => Some("f"),
            Accidental::Natural => Some("n"),
            Accidental::DoubleSharp => Some("x"),
            Accidental::DoubleFlat => Some("ff"),
            Accidental::QuarterSharp => Some("1qs"),
        }
    }

    /// Kern spelling. Natural and none are both unwritten; quarter tones have
    /// no kern spelling at all (`None`).
    pub fn kern(self) -> Option<&'static str> {
        match self {
            Accidental::None | Accidental::Natural => Some(""),
            Accidental::Sharp => Some("#"),
            Accidental::Flat => Some("-"),
            Accidental::DoubleSharp => Some("##"),
            Accidental::DoubleFlat => Some("--"),
            Accidental::QuarterSharp => None,
        }
    }
}

/// Accidental constraint of an exact pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccidentalSpec {
    Any,
    Exact(Accidental),
}

/// Pitch constraint of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchSpec {
    Any,
    Exact {
        name: PitchName,
        octave: i8,
        accidental: AccidentalSpec,
    },
}

// ============================================================================
// DURATION
// ============================================================================

/// Duration code: a note-value denominator or one of the long values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationCode {
    Denominator(u32),
    Breve,
    Long,
    Maxima,
}

impl DurationCode {
    /// Parse an MEI `dur` value
    pub fn from_mei(s: &str) -> Option<Self> {
        match s.trim() {
            "breve" => Some(DurationCode::Breve),
            "long" => Some(DurationCode::Long),
            "maxima" => Some(DurationCode::Maxima),
            other => match other.parse::<u32>() {
                Ok(0) | Err(_) => None,
                Ok(n) => Some(DurationCode::Denominator(n)),
            },
        }
    }

    /// Kern recip token (breve, long and maxima are written 0, 00, 000)
    pub fn kern(self) -> String {
        match self {
            DurationCode::Denominator(n) => n.to_string(),
            DurationCode::Breve => "0".to_string(),
            DurationCode::Long => "00".to_string(),
            DurationCode::Maxima => "000".to_string(),
        }
    }
}

impl Default for DurationCode {
    fn default() -> Self {
        DurationCode::Denominator(4)
    }
}

/// Duration constraint of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationSpec {
    Any,
    Exact { code: DurationCode, dots: u8 },
}

// ============================================================================
// TREE
// ============================================================================

/// A single note constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteSpec {
    pub pitch: PitchSpec,
    pub duration: DurationSpec,
}

/// Raw `min-occurrences` / `max-occurrences` of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OccurrenceBounds {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

/// Repetition suffix of a compiled group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantifier {
    ExactlyOne,
    Optional,
    OneOrMore,
    ZeroOrMore,
}

impl Quantifier {
    pub fn suffix(self) -> &'static str {
        match self {
            Quantifier::ExactlyOne => "",
            Quantifier::Optional => "?",
            Quantifier::OneOrMore => "+",
            Quantifier::ZeroOrMore => "*",
        }
    }
}

impl OccurrenceBounds {
    pub fn new(min: Option<u32>, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Quantifier for the recognized combinations, `None` for anything else
    pub fn quantifier(self) -> Option<Quantifier> {
        match (self.min, self.max) {
            (None, None) => Some(Quantifier::ExactlyOne),
            (Some(0), Some(1)) => Some(Quantifier::Optional),
            (Some(1), None) => Some(Quantifier::OneOrMore),
            (Some(0), None) => Some(Quantifier::ZeroOrMore),
            _ => None,
        }
    }
}

/// Node of the canonical pattern tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternNode {
    Note(NoteSpec),
    /// Children in order (`beam` and the pattern container)
    Sequence(Vec<PatternNode>),
    /// Sibling runs separated by `query:or` markers
    Alternation(Vec<Vec<PatternNode>>),
    Group {
        children: Vec<PatternNode>,
        bounds: OccurrenceBounds,
    },
}

impl PatternNode {
    /// Whether any note appears anywhere below this node
    pub fn contains_note(&self) -> bool {
        match self {
            PatternNode::Note(_) => true,
            PatternNode::Sequence(children) | PatternNode::Group { children, .. } => {
                children.iter().any(PatternNode::contains_note)
            }
            PatternNode::Alternation(branches) => {
                branches.iter().flatten().any(PatternNode::contains_note)
            }
        }
    }
}

// ============================================================================
// CANONICAL STRING FORM
// ============================================================================

fn write_list(f: &mut fmt::Formatter<'_>, nodes: &[PatternNode]) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", node)?;
    }
    Ok(())
}

fn write_bound(f: &mut fmt::Formatter<'_>, bound: Option<u32>) -> fmt::Result {
    match bound {
        Some(n) => write!(f, "{}", n),
        None => write!(f, "-"),
    }
}

impl fmt::Display for NoteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.duration {
            DurationSpec::Any => write!(f, "*")?,
            DurationSpec::Exact { code, dots } => {
                write!(f, "{}", code.kern())?;
                for _ in 0..dots {
                    write!(f, ".")?;
                }
            }
        }
        match self.pitch {
            PitchSpec::Any => write!(f, "/*"),
            PitchSpec::Exact { name, octave, accidental } => {
                write!(f, "/{}{}", name.letter(), octave)?;
                match accidental {
                    AccidentalSpec::Any => write!(f, "?"),
                    AccidentalSpec::Exact(acc) => write!(f, "{}", acc.mei_code().unwrap_or("")),
                }
            }
        }
    }
}

impl fmt::Display for PatternNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternNode::Note(note) => write!(f, "{}", note),
            PatternNode::Sequence(children) => {
                write!(f, "[")?;
                write_list(f, children)?;
                write!(f, "]")
            }
            PatternNode::Alternation(branches) => {
                write!(f, "<")?;
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write_list(f, branch)?;
                }
                write!(f, ">")
            }
            PatternNode::Group { children, bounds } => {
                write!(f, "(")?;
                write_list(f, children)?;
                write!(f, "){{")?;
                write_bound(f, bounds.min)?;
                write!(f, ",")?;
                write_bound(f, bounds.max)?;
                write!(f, "}}")
            }
        }
    }
}
