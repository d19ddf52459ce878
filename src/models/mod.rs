//! Shared data models for extraction input and lint output.

pub mod document;

pub use document::{Dialect, ExtractionRecord, SourceDocument, StyleBlock};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Lenient mapping of engine severity strings; unknown values are warnings.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("error") {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single engine finding. `line` is 1-based in whatever text was linted
/// until the dispatcher moves it into the original document's space.
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub severity: Severity,
    pub rule: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Diagnostics for one extracted block, already in original-file coordinates.
pub struct LintReport {
    pub file: String,
    pub messages: Vec<Diagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl LintReport {
    pub fn new(file: impl Into<String>, messages: Vec<Diagnostic>) -> Self {
        let error_count = messages
            .iter()
            .filter(|m| m.severity == Severity::Error)
            .count();
        let warning_count = messages.len() - error_count;
        Self {
            file: file.into(),
            messages,
            error_count,
            warning_count,
        }
    }
}

/// Ordered batches accumulated over a whole run.
pub type LintErrorSet = Vec<LintReport>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Aggregated counts used by printers and exit status.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub files: usize,
}

impl Summary {
    pub fn from_reports(reports: &[LintReport], files: usize) -> Self {
        Summary {
            errors: reports.iter().map(|r| r.error_count).sum(),
            warnings: reports.iter().map(|r| r.warning_count).sum(),
            files,
        }
    }
}
