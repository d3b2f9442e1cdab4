//! Compiled expression cache
//!
//! Patterns that normalize to the same tree share one compiled expression and
//! one built regex, so a host re-running a query does not rebuild either.

use super::errors::SearchError;
use super::locate::build_regex;
use crate::pattern::{compile, normalize_markup, CompiledPattern};
use regex::Regex;
use std::collections::hash_map::{Entry, HashMap};

/// A compiled pattern together with its built regex
#[derive(Debug, Clone)]
pub struct CachedExpression {
    pub compiled: CompiledPattern,
    pub regex: Regex,
}

/// Cache keyed by the canonical pattern form
#[derive(Debug, Default)]
pub struct ExpressionCache {
    entries: HashMap<String, CachedExpression>,
}

impl ExpressionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `markup`, or return the entry for an equivalent pattern
    pub fn get_or_compile(&mut self, markup: &str) -> Result<&CachedExpression, SearchError> {
        let tree = normalize_markup(markup)?;
        let key = tree.to_string();

        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                log::debug!("expression cache hit: {}", entry.key());
                Ok(&*entry.into_mut())
            }
            Entry::Vacant(entry) => {
                log::debug!("expression cache miss: {}", entry.key());
                let compiled = compile(&tree);
                let regex = build_regex(&compiled.expression)?;
                Ok(&*entry.insert(CachedExpression { compiled, regex }))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
