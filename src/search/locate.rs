//! Match locator
//!
//! Runs a compiled expression over score text in multi-line mode (`^` matches
//! after every newline) and collects every non-overlapping match, left to
//! right. Zero-length matches are dropped: they cover no record.

use super::errors::SearchError;
use super::types::MatchSpan;
use crate::annotate::{annotate, Annotation};
use crate::pattern::CompiledExpression;
use regex::{Regex, RegexBuilder};

/// Build the engine-side regex for a compiled expression
pub fn build_regex(expression: &CompiledExpression) -> Result<Regex, SearchError> {
    RegexBuilder::new(expression.as_str())
        .multi_line(true)
        .build()
        .map_err(|e| SearchError::InvalidExpression(e.to_string()))
}

/// All non-empty matches of a built regex, in text order
pub fn find_spans(regex: &Regex, score: &str) -> Vec<MatchSpan> {
    regex
        .find_iter(score)
        .filter(|m| !m.is_empty())
        .map(|m| MatchSpan::new(m.start(), m.end()))
        .collect()
}

/// Locate every match of `expression` in `score`
pub fn locate(score: &str, expression: &CompiledExpression) -> Result<Vec<MatchSpan>, SearchError> {
    let regex = build_regex(expression)?;
    let spans = find_spans(&regex, score);
    log::debug!("located {} matches in {} bytes", spans.len(), score.len());
    Ok(spans)
}

/// Number of matches of `expression` in `score`
pub fn count_matches(score: &str, expression: &CompiledExpression) -> Result<usize, SearchError> {
    Ok(locate(score, expression)?.len())
}

/// Locate and annotate in one step
pub fn mark_score(
    score: &str,
    expression: &CompiledExpression,
    marker: char,
) -> Result<Annotation, SearchError> {
    let spans = locate(score, expression)?;
    Ok(annotate(score, &spans, marker)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile_markup;

    fn expression(markup: &str) -> CompiledExpression {
        compile_markup(markup).unwrap().expression
    }

    #[test]
    fn test_exact_note_matches_once() {
        let expr = expression(r#"<note pname="c" oct="4" dur="4"/>"#);
        let spans = locate("**kern\n4c\n4d\n*-\n", &expr).unwrap();
        assert_eq!(spans, vec![MatchSpan::new(7, 10)]);
    }

    #[test]
    fn test_multiline_anchor_matches_every_record() {
        let expr = expression(r#"<note pname="c" oct="4" dur="4"/>"#);
        assert_eq!(count_matches("**kern\n4c\n4c\n4c\n*-\n", &expr).unwrap(), 3);
    }

    #[test]
    fn test_no_match_is_empty() {
        let expr = expression(r#"<note pname="c" oct="4" dur="4"/>"#);
        assert!(locate("**kern\n4d\n*-\n", &expr).unwrap().is_empty());
    }

    #[test]
    fn test_zero_length_matches_are_dropped() {
        let expr = expression(
            r#"<query:group min-occurrences="0" max-occurrences="1"><note pname="g" oct="4"/></query:group>"#,
        );
        let spans = locate("**kern\n4c\n4g\n*-\n", &expr).unwrap();
        assert_eq!(spans, vec![MatchSpan::new(10, 13)]);
    }

    #[test]
    fn test_invalid_expression() {
        let err = locate("4c\n", &CompiledExpression::new("(unclosed")).unwrap_err();
        assert!(matches!(err, SearchError::InvalidExpression(_)));
    }

    #[test]
    fn test_mark_score() {
        let expr = expression(r#"<note pname="d" oct="4"/>"#);
        let annotation = mark_score("**kern\n4c\n4d\n*-\n", &expr, '@').unwrap();
        assert_eq!(annotation.touched_lines(), vec![2]);
        assert_eq!(annotation.marked_text(), "**kern\n4c\n4d@\n*-\n");
    }
}
