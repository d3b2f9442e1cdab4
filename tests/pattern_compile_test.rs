//! Pattern compiler tests through the public API
//!
//! Covers markup defaults, full-document input, grouping and alternation,
//! fallbacks reported as diagnostics, and fatal errors.

use kern_search::diagnostics::DiagnosticSeverity;
use kern_search::pattern::compile::{
    ANY_ACCIDENTAL, ANY_DURATION, ANY_PITCH, NEWLINE, ORNAMENT_PREFIX, RECORD_BOUNDARY,
    SKIPPED_RECORDS, TOKEN_END,
};
use kern_search::pattern::{compile_markup, PatternError};

fn note(body: &str) -> String {
    format!(
        "{}{}{}{}{}{}",
        RECORD_BOUNDARY, ORNAMENT_PREFIX, body, TOKEN_END, NEWLINE, SKIPPED_RECORDS
    )
}

fn expression(markup: &str) -> String {
    compile_markup(markup).unwrap().expression.into_string()
}

#[test]
fn test_note_defaults() {
    // no pname, no oct: c in octave 5
    assert_eq!(expression("<note/>"), note("4cc"));
    // pname without oct: octave 4
    assert_eq!(expression(r#"<note pname="G"/>"#), note("4g"));
    assert_eq!(expression(r#"<note pname="a" oct="2" dur="16"/>"#), note("16AA"));
}

#[test]
fn test_long_durations() {
    assert_eq!(expression(r#"<note pname="c" oct="4" dur="breve"/>"#), note("0c"));
    assert_eq!(expression(r#"<note pname="c" oct="4" dur="long"/>"#), note("00c"));
    assert_eq!(expression(r#"<note pname="c" oct="4" dur="2" dots="2"/>"#), note(r"2\.\.c"));
}

#[test]
fn test_wildcards_ignore_attributes() {
    let wildcard = expression(
        r#"<note pname="d" oct="7" accid="s" dur="8" dots="1" query:any-pitch="true" query:any-duration="true"/>"#,
    );
    assert_eq!(
        wildcard,
        note(&format!("{}{}{}", ANY_DURATION, ANY_PITCH, ANY_ACCIDENTAL))
    );

    let any_accidental = expression(r#"<note pname="b" oct="4" accid="f" query:any-accidental="true"/>"#);
    assert_eq!(any_accidental, note(&format!("4b{}", ANY_ACCIDENTAL)));
}

#[test]
fn test_wildcard_flags_require_true() {
    let compiled = compile_markup(r#"<note pname="e" oct="4" query:any-pitch="false"/>"#).unwrap();
    assert_eq!(compiled.expression.as_str(), note("4e"));
}

#[test]
fn test_beam_is_transparent() {
    let beamed = expression(r#"<beam><note pname="c" oct="4" dur="8"/><note pname="d" oct="4" dur="8"/></beam>"#);
    let flat = expression(r#"<note pname="c" oct="4" dur="8"/><note pname="d" oct="4" dur="8"/>"#);
    assert_eq!(beamed, flat);
}

#[test]
fn test_group_and_alternation() {
    let compiled = compile_markup(
        r#"<note pname="c" oct="4"/><query:group min-occurrences="1"><note pname="d" oct="4"/></query:group><query:or/><note pname="e" oct="4"/>"#,
    )
    .unwrap();

    assert_eq!(
        compiled.expression.as_str(),
        format!("{}({})+|{}", note("4c"), note("4d"), note("4e"))
    );
    assert_eq!(compiled.canonical, "[<4/c4 (4/d4){1,-} | 4/e4>]");
}

#[test]
fn test_unsupported_bounds_fall_back_to_zero_or_more() {
    let compiled = compile_markup(
        r#"<query:group min-occurrences="2" max-occurrences="3"><note pname="c" oct="4"/></query:group>"#,
    )
    .unwrap();

    assert_eq!(compiled.expression.as_str(), format!("({})*", note("4c")));
    assert_eq!(compiled.diagnostics.len(), 1);
    assert_eq!(compiled.diagnostics[0].severity, DiagnosticSeverity::Warning);
    assert_eq!(compiled.diagnostics[0].kind, "unsupported_occurrences");
}

#[test]
fn test_quarter_sharp_compiles_unaltered_with_diagnostic() {
    let compiled = compile_markup(r#"<note pname="f" oct="4" accid="1qs"/>"#).unwrap();
    assert_eq!(compiled.expression.as_str(), note("4f"));
    assert_eq!(compiled.diagnostics[0].kind, "unspellable_accidental");
}

#[test]
fn test_full_document_input() {
    let document = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE mei>
<mei xmlns="http://www.music-encoding.org/ns/mei" xmlns:query="http://www.matangover.com/musicquery">
  <music><body><mdiv><score><section><measure><staff><layer>
    <note pname="c" oct="4"/>
    <note query:any-pitch="true"/>
  </layer></staff></measure></section></score></mdiv></body></music>
</mei>"#;

    let compiled = compile_markup(document).unwrap();
    assert_eq!(compiled.canonical, "[4/c4 4/*]");
}

#[test]
fn test_two_layers_is_a_structure_error() {
    let document = r#"<mei xmlns="http://www.music-encoding.org/ns/mei">
  <music><body><mdiv><score><section><measure><staff>
    <layer><note pname="c"/></layer>
    <layer><note pname="d"/></layer>
  </staff></measure></section></score></mdiv></body></music>
</mei>"#;

    assert_eq!(
        compile_markup(document).unwrap_err(),
        PatternError::Structure { found: 2 }
    );
}

#[test]
fn test_fatal_errors() {
    assert!(matches!(compile_markup("<note"), Err(PatternError::InvalidXml(_))));
    assert_eq!(compile_markup(""), Err(PatternError::EmptyPattern));
    for markup in ["<beam/>", "<query:or/>", "<query:group/>"] {
        assert_eq!(compile_markup(markup), Err(PatternError::EmptyPattern), "{}", markup);
    }
    assert!(matches!(
        compile_markup(r#"<note oct="4"/>"#),
        Err(PatternError::MalformedPattern { ref attribute, .. }) if attribute == "pname"
    ));
    assert!(matches!(
        compile_markup(r#"<note pname="h"/>"#),
        Err(PatternError::MalformedPattern { .. })
    ));
    assert_eq!(
        compile_markup("<rest/>"),
        Err(PatternError::UnknownTag { tag: "rest".to_string() })
    );
    assert_eq!(
        compile_markup("<query:repeat/>"),
        Err(PatternError::UnknownTag { tag: "query:repeat".to_string() })
    );
}
