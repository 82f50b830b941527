//! Pipeline diagnostics.
//!
//! Non-fatal conditions (skipped columns, failed coercions, unmapped codes)
//! are reported through this explicit side-channel rather than global logging
//! state, so callers and tests can assert on what a run emitted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Info,
    Warning,
    Error,
}

/// A single diagnostic record emitted by a pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: DiagnosticSeverity,
    /// Stable machine-readable code (e.g. "missing-column", "conversion").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Column the diagnostic refers to, if any.
    pub column: Option<String>,
}

/// Ordered collection of diagnostics for one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diag: Diagnostic) {
        self.entries.push(diag);
    }

    pub fn info(&mut self, code: &str, message: impl Into<String>, column: Option<&str>) {
        self.push_with(DiagnosticSeverity::Info, code, message, column);
    }

    pub fn warning(&mut self, code: &str, message: impl Into<String>, column: Option<&str>) {
        self.push_with(DiagnosticSeverity::Warning, code, message, column);
    }

    pub fn error(&mut self, code: &str, message: impl Into<String>, column: Option<&str>) {
        self.push_with(DiagnosticSeverity::Error, code, message, column);
    }

    fn push_with(
        &mut self,
        severity: DiagnosticSeverity,
        code: &str,
        message: impl Into<String>,
        column: Option<&str>,
    ) {
        self.entries.push(Diagnostic {
            severity,
            code: code.to_string(),
            message: message.into(),
            column: column.map(ToString::to_string),
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|diag| diag.severity == DiagnosticSeverity::Warning)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|diag| diag.severity == DiagnosticSeverity::Error)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// All diagnostics carrying the given code.
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries.iter().filter(move |diag| diag.code == code)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
