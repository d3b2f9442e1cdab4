//! Score search
//!
//! Locates compiled pattern expressions in kern score text and ranks a
//! corpus of scores by match count.
//!
//! # Module Structure
//!
//! - `locate`: Build the regex and collect match spans
//! - `voices`: Split a score into one text per `**kern` spine
//! - `corpus`: Score collection, ranking and directory import
//! - `cache`: Compiled expressions keyed by canonical pattern
//! - `types`: Spans, settings and hits
//! - `errors`: Error types

pub mod cache;
pub mod corpus;
pub mod errors;
pub mod locate;
pub mod types;
pub mod voices;

pub use cache::{CachedExpression, ExpressionCache};
pub use corpus::{Corpus, Score, MAX_SCORE_BYTES};
#[cfg(not(target_arch = "wasm32"))]
pub use corpus::{find_kern_files, read_score, KERN_EXTENSION};
pub use errors::{ImportError, SearchError};
pub use locate::{build_regex, count_matches, find_spans, locate, mark_score};
pub use types::{MatchSpan, ScanMode, SearchHit, SearchSettings};
pub use voices::split_voices;
