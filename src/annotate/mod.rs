//! Match annotation
//!
//! Maps match spans (byte offsets into the flattened score text) back to the
//! score's line indices and marks those lines for highlighting. Kern
//! renderers colour notes carrying a marker signifier declared by an
//! `!!!RDF**kern` reference record, which `Annotation::to_humdrum` appends.
//!
//! The end line of a span is taken at `end - 2`: a match always ends just
//! past the newline of its last record, so `end - 1` is that newline and
//! `end - 2` the record's last content byte.

use crate::search::MatchSpan;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Marker appended to matched records
pub const DEFAULT_MARKER: char = '@';

/// First character of a null record, which cannot carry a marker
pub const NULL_RECORD: char = '.';

/// Distance from a match end back to the last content byte of its last record
pub const TRAILING_NEWLINE_SPAN: usize = 2;

/// Errors raised when spans and score text disagree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotateError {
    #[error("Offset {offset} is beyond the end of the score ({len} bytes)")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("Empty line found at line {line}")]
    EmptyLine { line: usize },
}

// ============================================================================
// LINE MAP
// ============================================================================

/// Offset-to-line lookup, built once per score
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Cumulative byte count at the end of each line, newline included
    ends: Vec<usize>,
    /// First line with no content
    first_empty: Option<usize>,
    len: usize,
}

impl LineMap {
    pub fn new(score: &str) -> Self {
        let mut ends = Vec::new();
        let mut first_empty = None;
        let mut total = 0;

        for (index, line) in score.split('\n').enumerate() {
            if line.is_empty() && first_empty.is_none() {
                first_empty = Some(index);
            }
            total += line.len() + 1;
            ends.push(total);
        }

        Self {
            ends,
            first_empty,
            len: score.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.ends.len()
    }

    /// Line containing `offset`: the first line whose cumulative count
    /// exceeds it. Reaching an empty line on the way is an error.
    pub fn line_of(&self, offset: usize) -> Result<usize, AnnotateError> {
        let index = self.ends.partition_point(|&end| end <= offset);

        if index >= self.ends.len() {
            return Err(AnnotateError::OffsetOutOfRange {
                offset,
                len: self.len,
            });
        }

        match self.first_empty {
            Some(line) if line <= index => Err(AnnotateError::EmptyLine { line }),
            _ => Ok(index),
        }
    }
}

// ============================================================================
// ANNOTATION
// ============================================================================

/// Score lines with matched records marked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Score lines, marked where touched
    pub lines: Vec<String>,

    /// Every line touched by at least one span
    pub touched: BTreeSet<usize>,

    /// Marker appended to touched lines
    pub marker: char,
}

impl Annotation {
    /// Touched line indices in ascending order
    pub fn touched_lines(&self) -> Vec<usize> {
        self.touched.iter().copied().collect()
    }

    /// The marked score, newline-delimited like the input
    pub fn marked_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Reference record declaring the marker to kern renderers
    pub fn legend(&self) -> String {
        format!("!!!RDF**kern: {} = marked note", self.marker)
    }

    /// Marked score with the marker legend appended as the last record
    pub fn to_humdrum(&self) -> String {
        if self.touched.is_empty() {
            return self.marked_text();
        }

        let mut lines = self.lines.clone();
        let legend = self.legend();
        match lines.last() {
            Some(last) if last.is_empty() => {
                let at = lines.len() - 1;
                lines.insert(at, legend);
            }
            _ => lines.push(legend),
        }
        lines.join("\n")
    }
}

/// Mark every line touched by the spans.
///
/// Each span covers `line_of(start)..=line_of(end - 2)`. A touched line gets
/// the marker once, however many spans touch it; null records are recorded
/// as touched but left unmarked. Spans shorter than two bytes touch nothing.
pub fn annotate(score: &str, spans: &[MatchSpan], marker: char) -> Result<Annotation, AnnotateError> {
    let map = LineMap::new(score);
    let mut lines: Vec<String> = score.split('\n').map(str::to_string).collect();
    let mut touched = BTreeSet::new();

    for span in spans {
        if span.end < span.start + TRAILING_NEWLINE_SPAN {
            log::debug!("skipping degenerate span {}..{}", span.start, span.end);
            continue;
        }

        let start_line = map.line_of(span.start)?;
        let end_line = map.line_of(span.end - TRAILING_NEWLINE_SPAN)?;

        for index in start_line..=end_line {
            if !touched.insert(index) {
                continue;
            }
            if let Some(line) = lines.get_mut(index) {
                if !line.starts_with(NULL_RECORD) {
                    line.push(marker);
                }
            }
        }
    }

    log::debug!("annotated {} spans over {} lines", spans.len(), touched.len());

    Ok(Annotation {
        lines,
        touched,
        marker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCORE: &str = "**kern\n4c\n.\n4d\n*-\n";

    #[test]
    fn test_line_of_boundaries() {
        let map = LineMap::new(SCORE);
        // "**kern" occupies 0..=6 (newline at 6)
        assert_eq!(map.line_of(0), Ok(0));
        assert_eq!(map.line_of(6), Ok(0));
        assert_eq!(map.line_of(7), Ok(1));
        assert_eq!(map.line_of(9), Ok(1));
        assert_eq!(map.line_of(10), Ok(2));
        assert_eq!(map.line_of(12), Ok(3));
        assert_eq!(map.line_count(), 6);
    }

    #[test]
    fn test_offset_out_of_range() {
        let map = LineMap::new("4c\n4d");
        assert_eq!(map.line_of(5), Ok(1));
        assert_eq!(
            map.line_of(6),
            Err(AnnotateError::OffsetOutOfRange { offset: 6, len: 5 })
        );
    }

    #[test]
    fn test_empty_line_is_reported() {
        let map = LineMap::new("4c\n\n4d\n");
        assert_eq!(map.line_of(1), Ok(0));
        assert_eq!(map.line_of(4), Err(AnnotateError::EmptyLine { line: 1 }));
    }

    #[test]
    fn test_single_line_span() {
        // Span over "4c\n" (offsets 7..10): end - 2 lands on 'c'
        let annotation = annotate(SCORE, &[MatchSpan::new(7, 10)], DEFAULT_MARKER).unwrap();

        assert_eq!(annotation.touched_lines(), vec![1]);
        let original: Vec<&str> = SCORE.split('\n').collect();
        let marked = annotation.marked_text();
        let changed: Vec<(usize, &str)> = marked
            .split('\n')
            .enumerate()
            .filter(|(i, line)| *line != original[*i])
            .collect();
        assert_eq!(changed, vec![(1, "4c@")]);
    }

    #[test]
    fn test_null_records_are_touched_but_not_marked() {
        // "4c\n.\n4d\n" spans offsets 7..15
        let annotation = annotate(SCORE, &[MatchSpan::new(7, 15)], '@').unwrap();

        assert_eq!(annotation.touched_lines(), vec![1, 2, 3]);
        assert_eq!(annotation.lines[1], "4c@");
        assert_eq!(annotation.lines[2], ".");
        assert_eq!(annotation.lines[3], "4d@");
    }

    #[test]
    fn test_overlapping_spans_mark_once() {
        let annotation = annotate(
            SCORE,
            &[MatchSpan::new(7, 10), MatchSpan::new(7, 15)],
            '@',
        )
        .unwrap();
        assert_eq!(annotation.lines[1], "4c@");
    }

    #[test]
    fn test_degenerate_spans_are_skipped() {
        let annotation = annotate(SCORE, &[MatchSpan::new(0, 0), MatchSpan::new(3, 4)], '@').unwrap();
        assert!(annotation.touched.is_empty());
        assert_eq!(annotation.marked_text(), SCORE);
        assert_eq!(annotation.to_humdrum(), SCORE);
    }

    #[test]
    fn test_to_humdrum_appends_legend_before_trailing_newline() {
        let annotation = annotate(SCORE, &[MatchSpan::new(7, 10)], '@').unwrap();
        assert_eq!(
            annotation.to_humdrum(),
            "**kern\n4c@\n.\n4d\n*-\n!!!RDF**kern: @ = marked note\n"
        );
    }

    #[test]
    fn test_span_past_end_is_an_error() {
        let err = annotate("4c\n4d", &[MatchSpan::new(3, 10)], '@').unwrap_err();
        assert_eq!(err, AnnotateError::OffsetOutOfRange { offset: 8, len: 5 });
    }
}
