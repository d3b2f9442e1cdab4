//! Diagnostics for recoverable pattern problems
//!
//! Some pattern inputs are not supported exactly but have a documented
//! fallback (an unsupported occurrence range compiles as zero-or-more, an
//! accidental with no kern spelling compiles as no accidental). Compilation
//! continues in those cases and records a diagnostic next to the expression
//! so the host can show what was changed.

use serde::{Deserialize, Serialize};

/// Severity level for a diagnostic. Every fallback is a warning; fatal
/// problems are `PatternError`s instead.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Warning,
}

/// A recoverable issue found while normalizing or compiling a pattern
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Kind identifier (e.g., "unsupported_occurrences", "unspellable_accidental")
    pub kind: String,
    /// Markup element the diagnostic refers to (e.g., "query:group")
    pub element: String,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Create a warning diagnostic
    pub fn warning(
        kind: impl Into<String>,
        element: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            kind: kind.into(),
            element: element.into(),
            message: message.into(),
        }
    }
}

/// Collection of diagnostics gathered during one compilation
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a diagnostic, echoing it to the log
    pub fn add(&mut self, diagnostic: Diagnostic) {
        log::warn!("{} <{}>: {}", diagnostic.kind, diagnostic.element, diagnostic.message);
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_shorthand() {
        let diag = Diagnostic::warning("unsupported_occurrences", "query:group", "min=2, max=5");

        assert_eq!(diag.severity, DiagnosticSeverity::Warning);
        assert_eq!(diag.kind, "unsupported_occurrences");
        assert_eq!(diag.element, "query:group");
    }

    #[test]
    fn test_diagnostics_collects_in_order() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());

        diags.add(Diagnostic::warning("first", "note", "First"));
        diags.add(Diagnostic::warning("second", "query:group", "Second"));

        let kinds: Vec<String> = diags.into_vec().into_iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec!["first", "second"]);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&DiagnosticSeverity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
