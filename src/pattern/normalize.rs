//! MEI markup to canonical pattern tree
//!
//! A pure transform: attribute defaults are applied while building new
//! `PatternNode`s, the parsed document is only read.
//!
//! Defaults for `note`:
//! - `query:any-duration` wins over `dur`/`dots`; otherwise `dur` defaults to 4
//! - `query:any-pitch` wins over `pname`/`oct`/`accid`; otherwise a note with
//!   neither `pname` nor `oct` is c in octave 5, and `oct` alone defaults to 4
//! - `query:any-accidental` replaces `accid` on an exact pitch
//!
//! `query:or` markers split their siblings into the branches of an
//! `Alternation`.

use super::errors::PatternError;
use super::model::{
    Accidental, AccidentalSpec, DurationCode, DurationSpec, NoteSpec, OccurrenceBounds,
    PatternNode, PitchName, PitchSpec,
};
use crate::markup::parser::{
    attribute, child_elements, display_name, is_query_element, query_flag, XmlDocument,
};
use crate::markup::to_document;
use roxmltree::Node;

/// Octave of a note given neither `pname` nor `oct`
pub const IMPLICIT_OCTAVE: i8 = 5;

/// Octave of a note given `pname` but no `oct`
pub const DEFAULT_OCTAVE: i8 = 4;

/// Normalize pattern markup (fragment or full document)
pub fn normalize_markup(markup: &str) -> Result<PatternNode, PatternError> {
    let xml = to_document(markup)?;
    let doc = XmlDocument::parse(&xml)?;
    normalize_document(&doc)
}

/// Normalize the single pattern container of a parsed document
pub fn normalize_document(doc: &XmlDocument) -> Result<PatternNode, PatternError> {
    let container = doc.pattern_container()?;

    if child_elements(container).next().is_none() {
        return Err(PatternError::EmptyPattern);
    }

    let tree = PatternNode::Sequence(normalize_children(container)?);
    if !tree.contains_note() {
        return Err(PatternError::EmptyPattern);
    }
    Ok(tree)
}

fn is_or_marker(node: Node) -> bool {
    is_query_element(node) && node.tag_name().name() == "or"
}

/// Normalize a container's children, splitting at `query:or` markers
fn normalize_children(parent: Node) -> Result<Vec<PatternNode>, PatternError> {
    let mut branches: Vec<Vec<PatternNode>> = vec![Vec::new()];

    for child in child_elements(parent) {
        if is_or_marker(child) {
            branches.push(Vec::new());
            continue;
        }
        let node = normalize_element(child)?;
        if let Some(branch) = branches.last_mut() {
            branch.push(node);
        }
    }

    if branches.len() == 1 {
        Ok(branches.pop().unwrap_or_default())
    } else {
        Ok(vec![PatternNode::Alternation(branches)])
    }
}

fn normalize_element(node: Node) -> Result<PatternNode, PatternError> {
    let name = node.tag_name().name();

    if is_query_element(node) {
        return match name {
            "group" => normalize_group(node),
            _ => Err(PatternError::UnknownTag {
                tag: display_name(node),
            }),
        };
    }

    match name {
        "note" => Ok(PatternNode::Note(normalize_note(node)?)),
        "beam" => Ok(PatternNode::Sequence(normalize_children(node)?)),
        _ => Err(PatternError::UnknownTag {
            tag: display_name(node),
        }),
    }
}

fn normalize_group(node: Node) -> Result<PatternNode, PatternError> {
    let min = parse_count(node, "min-occurrences")?;
    let max = parse_count(node, "max-occurrences")?;

    Ok(PatternNode::Group {
        children: normalize_children(node)?,
        bounds: OccurrenceBounds::new(min, max),
    })
}

fn parse_count(node: Node, name: &str) -> Result<Option<u32>, PatternError> {
    attribute(node, name)
        .map(|value| {
            value.trim().parse::<u32>().map_err(|_| {
                PatternError::malformed("query:group", name, value, "is not a non-negative integer")
            })
        })
        .transpose()
}

// ============================================================================
// NOTE
// ============================================================================

fn normalize_note(node: Node) -> Result<NoteSpec, PatternError> {
    Ok(NoteSpec {
        pitch: normalize_pitch(node)?,
        duration: normalize_duration(node)?,
    })
}

fn normalize_duration(node: Node) -> Result<DurationSpec, PatternError> {
    if query_flag(node, "any-duration") {
        return Ok(DurationSpec::Any);
    }

    let code = match attribute(node, "dur") {
        None => DurationCode::default(),
        Some(value) => DurationCode::from_mei(value).ok_or_else(|| {
            PatternError::malformed("note", "dur", value, "is not a duration code")
        })?,
    };

    let dots = match attribute(node, "dots") {
        None => 0,
        Some(value) => value.trim().parse::<u8>().map_err(|_| {
            PatternError::malformed("note", "dots", value, "is not a dot count")
        })?,
    };

    Ok(DurationSpec::Exact { code, dots })
}

fn normalize_pitch(node: Node) -> Result<PitchSpec, PatternError> {
    if query_flag(node, "any-pitch") {
        return Ok(PitchSpec::Any);
    }

    let (name, octave) = match (attribute(node, "pname"), attribute(node, "oct")) {
        (None, None) => (PitchName::C, IMPLICIT_OCTAVE),
        (None, Some(_)) => {
            return Err(PatternError::malformed(
                "note",
                "pname",
                "",
                "is required unless query:any-pitch is set",
            ))
        }
        (Some(pname), oct) => {
            let name = PitchName::from_letter(pname).ok_or_else(|| {
                PatternError::malformed("note", "pname", pname, "is not a pitch letter a-g")
            })?;
            let octave = match oct {
                None => DEFAULT_OCTAVE,
                Some(value) => value.trim().parse::<i8>().map_err(|_| {
                    PatternError::malformed("note", "oct", value, "is not an integer")
                })?,
            };
            (name, octave)
        }
    };

    let accidental = if query_flag(node, "any-accidental") {
        AccidentalSpec::Any
    } else {
        match attribute(node, "accid") {
            None => AccidentalSpec::Exact(Accidental::None),
            Some(value) => AccidentalSpec::Exact(Accidental::from_mei(value).ok_or_else(|| {
                PatternError::malformed("note", "accid", value, "is not a supported accidental")
            })?),
        }
    };

    Ok(PitchSpec::Exact {
        name,
        octave,
        accidental,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_note(markup: &str) -> NoteSpec {
        match normalize_markup(markup).unwrap() {
            PatternNode::Sequence(children) => match children.as_slice() {
                [PatternNode::Note(note)] => *note,
                other => panic!("expected one note, got {:?}", other),
            },
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_pattern_without_notes_is_empty() {
        for markup in [
            "<beam/>",
            "<query:or/>",
            "<query:group/>",
            "<beam><query:group/></beam>",
        ] {
            assert_eq!(
                normalize_markup(markup),
                Err(PatternError::EmptyPattern),
                "markup {}",
                markup
            );
        }
    }

    #[test]
    fn test_note_defaults() {
        let note = single_note("<note/>");
        assert_eq!(
            note.pitch,
            PitchSpec::Exact {
                name: PitchName::C,
                octave: 5,
                accidental: AccidentalSpec::Exact(Accidental::None),
            }
        );
        assert_eq!(
            note.duration,
            DurationSpec::Exact {
                code: DurationCode::Denominator(4),
                dots: 0,
            }
        );
    }

    #[test]
    fn test_pname_without_oct_uses_octave_four() {
        let note = single_note(r#"<note pname="E" dur="8" dots="1" accid="f"/>"#);
        assert_eq!(
            note.pitch,
            PitchSpec::Exact {
                name: PitchName::E,
                octave: 4,
                accidental: AccidentalSpec::Exact(Accidental::Flat),
            }
        );
        assert_eq!(
            note.duration,
            DurationSpec::Exact {
                code: DurationCode::Denominator(8),
                dots: 1,
            }
        );
    }

    #[test]
    fn test_wildcards_ignore_attributes() {
        let note = single_note(
            r#"<note pname="zz" oct="x" dur="bogus" dots="y" query:any-pitch="true" query:any-duration="true"/>"#,
        );
        assert_eq!(note.pitch, PitchSpec::Any);
        assert_eq!(note.duration, DurationSpec::Any);
    }

    #[test]
    fn test_any_accidental_keeps_letter_and_octave() {
        let note = single_note(r#"<note pname="g" oct="3" accid="s" query:any-accidental="true"/>"#);
        assert_eq!(
            note.pitch,
            PitchSpec::Exact {
                name: PitchName::G,
                octave: 3,
                accidental: AccidentalSpec::Any,
            }
        );
    }

    #[test]
    fn test_oct_without_pname_is_malformed() {
        let err = normalize_markup(r#"<note oct="4"/>"#).unwrap_err();
        assert!(matches!(
            err,
            PatternError::MalformedPattern { ref attribute, .. } if attribute == "pname"
        ));
    }

    #[test]
    fn test_bad_attribute_values_are_malformed() {
        for markup in [
            r#"<note pname="h"/>"#,
            r#"<note pname="c" oct="high"/>"#,
            r#"<note dur="quarter"/>"#,
            r#"<note dots="-1"/>"#,
            r#"<note pname="c" accid="sharp"/>"#,
            r#"<query:group min-occurrences="many"><note/></query:group>"#,
        ] {
            assert!(
                matches!(normalize_markup(markup), Err(PatternError::MalformedPattern { .. })),
                "expected malformed pattern for {}",
                markup
            );
        }
    }

    #[test]
    fn test_or_splits_siblings() {
        let tree = normalize_markup(
            r#"<note pname="c"/><query:or/><note pname="d"/><note pname="e"/>"#,
        )
        .unwrap();

        match tree {
            PatternNode::Sequence(children) => match children.as_slice() {
                [PatternNode::Alternation(branches)] => {
                    assert_eq!(branches.len(), 2);
                    assert_eq!(branches[0].len(), 1);
                    assert_eq!(branches[1].len(), 2);
                }
                other => panic!("expected alternation, got {:?}", other),
            },
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_group_and_beam() {
        let tree = normalize_markup(
            r#"<beam><query:group min-occurrences="1"><note/></query:group></beam>"#,
        )
        .unwrap();

        let expected = PatternNode::Sequence(vec![PatternNode::Sequence(vec![PatternNode::Group {
            children: vec![PatternNode::Note(single_note("<note/>"))],
            bounds: OccurrenceBounds::new(Some(1), None),
        }])]);
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_unknown_tags() {
        assert_eq!(
            normalize_markup(r#"<rest dur="4"/>"#).unwrap_err(),
            PatternError::UnknownTag { tag: "rest".to_string() }
        );
        assert_eq!(
            normalize_markup(r#"<query:repeat/>"#).unwrap_err(),
            PatternError::UnknownTag { tag: "query:repeat".to_string() }
        );
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(normalize_markup("   ").unwrap_err(), PatternError::EmptyPattern);
        assert_eq!(
            normalize_markup("<!-- nothing here -->").unwrap_err(),
            PatternError::EmptyPattern
        );
    }
}
