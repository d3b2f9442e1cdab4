//! Score corpus
//!
//! An in-memory collection of kern scores that can be ranked by match count
//! for a compiled pattern. On native targets a corpus can be imported from a
//! directory tree of `.krn` files.

use super::errors::SearchError;
use super::locate::{build_regex, find_spans};
use super::types::{ScanMode, SearchHit};
use super::voices::split_voices;
use crate::pattern::CompiledExpression;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Largest score file accepted on import
pub const MAX_SCORE_BYTES: usize = 2_000_000;

/// A kern score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub id: u32,
    pub title: String,
    pub kern_data: String,
}

impl Score {
    pub fn new(id: u32, title: impl Into<String>, kern_data: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            kern_data: kern_data.into(),
        }
    }

    /// Match count of a built regex over this score
    pub fn count_matches(&self, regex: &Regex, mode: ScanMode) -> usize {
        match mode {
            ScanMode::Whole => find_spans(regex, &self.kern_data).len(),
            ScanMode::Voices => split_voices(&self.kern_data)
                .iter()
                .map(|voice| find_spans(regex, voice).len())
                .sum(),
        }
    }
}

/// Collection of scores to search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    scores: Vec<Score>,
}

impl Corpus {
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    pub fn from_scores(scores: Vec<Score>) -> Self {
        Self { scores }
    }

    /// Add a score under the id after the highest one in use. Returns
    /// `None` (and adds nothing) once `u32::MAX` is taken.
    pub fn add(&mut self, title: impl Into<String>, kern_data: impl Into<String>) -> Option<u32> {
        let id = match self.scores.iter().map(|s| s.id).max() {
            None => 0,
            Some(max) => max.checked_add(1)?,
        };
        self.scores.push(Score::new(id, title, kern_data));
        Some(id)
    }

    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    pub fn get(&self, id: u32) -> Option<&Score> {
        self.scores.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scores with at least one match, most matches first
    pub fn search(
        &self,
        expression: &CompiledExpression,
        mode: ScanMode,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let regex = build_regex(expression)?;
        Ok(self.search_with(&regex, mode))
    }

    /// Same as [`Corpus::search`] with an already built regex
    pub fn search_with(&self, regex: &Regex, mode: ScanMode) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self
            .scores
            .iter()
            .filter_map(|score| {
                let match_count = score.count_matches(regex, mode);
                (match_count > 0).then(|| SearchHit {
                    id: score.id,
                    title: score.title.clone(),
                    match_count,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.match_count.cmp(&a.match_count));
        log::debug!("{} of {} scores matched", hits.len(), self.scores.len());
        hits
    }
}

// ============================================================================
// DIRECTORY IMPORT
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod import {
    use super::{Corpus, Score, MAX_SCORE_BYTES};
    use crate::search::errors::ImportError;
    use std::fs;
    use std::path::{Path, PathBuf};
    use walkdir::WalkDir;

    /// File extension of kern scores
    pub const KERN_EXTENSION: &str = "krn";

    fn io_error(path: &Path, source: std::io::Error) -> ImportError {
        ImportError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Every `.krn` file below `dir`, sorted by name within each directory.
    /// Symbolic links are not followed.
    pub fn find_kern_files(dir: &Path) -> Result<Vec<PathBuf>, ImportError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                io_error(&path, e.into())
            })?;
            let is_kern = entry.path().extension().and_then(|e| e.to_str()) == Some(KERN_EXTENSION);
            if entry.file_type().is_file() && is_kern {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Read one score file; the title is the file stem
    pub fn read_score(path: &Path, id: u32) -> Result<Score, ImportError> {
        let kern_data = fs::read_to_string(path).map_err(|e| io_error(path, e))?;

        if kern_data.len() > MAX_SCORE_BYTES {
            return Err(ImportError::TooLarge {
                path: path.display().to_string(),
                len: kern_data.len(),
                limit: MAX_SCORE_BYTES,
            });
        }

        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(Score::new(id, title, kern_data.replace("\r\n", "\n")))
    }

    impl Corpus {
        /// Import every `.krn` file below `dir`. Files that cannot be read
        /// or are too large are logged and skipped.
        pub fn load_directory(dir: impl AsRef<Path>) -> Result<Corpus, ImportError> {
            let files = find_kern_files(dir.as_ref())?;
            log::info!("Found {} kern files", files.len());

            let mut corpus = Corpus::new();
            for path in files {
                let Ok(id) = u32::try_from(corpus.len()) else {
                    log::error!("Score ids exhausted, stopping import at {}", path.display());
                    break;
                };
                match read_score(&path, id) {
                    Ok(score) => corpus.scores.push(score),
                    Err(e) => log::error!("Error importing {}: {}", path.display(), e),
                }
            }

            log::info!("Imported {} scores", corpus.len());
            Ok(corpus)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use import::{find_kern_files, read_score, KERN_EXTENSION};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile_markup;

    fn corpus() -> Corpus {
        let mut corpus = Corpus::new();
        corpus.add("one", "**kern\n4c\n4d\n*-\n");
        corpus.add("none", "**kern\n4e\n4f\n*-\n");
        corpus.add("three", "**kern\t**kern\n4c\t4c\n4d\t4d\n4c\t4e\n4d\t4f\n*-\t*-\n");
        corpus
    }

    #[test]
    fn test_add_assigns_ids() {
        let corpus = corpus();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.get(2).map(|s| s.title.as_str()), Some("three"));
        assert!(corpus.get(3).is_none());
    }

    #[test]
    fn test_search_ranks_by_match_count() {
        let expr = compile_markup(r#"<note pname="c" oct="4"/><note pname="d" oct="4"/>"#)
            .unwrap()
            .expression;

        let hits = corpus().search(&expr, ScanMode::Voices).unwrap();
        assert_eq!(
            hits,
            vec![
                SearchHit { id: 2, title: "three".to_string(), match_count: 3 },
                SearchHit { id: 0, title: "one".to_string(), match_count: 1 },
            ]
        );
    }

    #[test]
    fn test_whole_scan_counts_full_records() {
        let expr = compile_markup(r#"<note pname="c" oct="4"/><note pname="d" oct="4"/>"#)
            .unwrap()
            .expression;

        let hits = corpus().search(&expr, ScanMode::Whole).unwrap();
        let three = hits.iter().find(|h| h.id == 2).unwrap();
        assert_eq!(three.match_count, 2);
    }

    #[test]
    fn test_add_after_highest_id() {
        let mut corpus = Corpus::from_scores(vec![Score::new(41, "x", "**kern\n*-\n")]);
        assert_eq!(corpus.add("y", "**kern\n*-\n"), Some(42));
    }

    #[test]
    fn test_add_when_max_id_is_taken() {
        let json = r#"[{"id": 4294967295, "title": "last", "kern_data": "**kern\n*-\n"}]"#;
        let mut corpus: Corpus = serde_json::from_str(json).unwrap();

        assert_eq!(corpus.add("x", "y"), None);
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn test_serializes_as_score_list() {
        let json = r#"[{"id": 7, "title": "t", "kern_data": "**kern\n4c\n*-\n"}]"#;
        let corpus: Corpus = serde_json::from_str(json).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.scores()[0].id, 7);
    }
}
