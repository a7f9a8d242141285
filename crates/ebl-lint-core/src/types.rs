//! Core types for findings and validation reports.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail validation.
    Info,
    /// Policy advisory that should be addressed.
    Warning,
    /// Structural impossibility that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single finding produced by a validator rule or a heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule code (e.g., "EBL003").
    pub code: String,
    /// Rule name (e.g., "missing-data-ref").
    pub rule: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Optional hint for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to this finding.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} {}\n", self.code, self.rule);
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {suggestion}");
        }
        output
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Converts a Finding to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct FindingDiagnostic {
    message: String,
    help: Option<String>,
    code: String,
    severity: miette::Severity,
}

impl Diagnostic for FindingDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }
}

impl From<&Finding> for FindingDiagnostic {
    fn from(f: &Finding) -> Self {
        Self {
            message: format!("[{}] {}", f.code, f.message),
            help: f.suggestion.clone(),
            code: format!("{} {}", f.code, f.rule),
            severity: match f.severity {
                Severity::Info => miette::Severity::Advice,
                Severity::Warning => miette::Severity::Warning,
                Severity::Error => miette::Severity::Error,
            },
        }
    }
}

/// Output of one validation run: errors and warnings in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Structural findings.
    pub errors: Vec<Finding>,
    /// Policy advisories.
    pub warnings: Vec<Finding>,
}

impl ValidationReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finding to the bucket matching its severity.
    ///
    /// Info-level findings are kept with warnings.
    pub fn push(&mut self, finding: Finding) {
        if finding.severity == Severity::Error {
            self.errors.push(finding);
        } else {
            self.warnings.push(finding);
        }
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns true if neither errors nor warnings were recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Returns `(errors, warnings)` counts.
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        (self.errors.len(), self.warnings.len())
    }

    /// Iterates errors first, then warnings.
    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

/// Results for one syntax tree file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Path of the tree file.
    pub path: PathBuf,
    /// Validator output.
    pub report: ValidationReport,
    /// Heuristic advisories, kept apart from the validator's buckets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<Finding>,
}

impl FileReport {
    /// Creates a file report without advisories.
    #[must_use]
    pub fn new(path: PathBuf, report: ValidationReport) -> Self {
        Self {
            path,
            report,
            advisories: Vec::new(),
        }
    }
}

/// Aggregate result of validating a set of files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RunResult {
    /// Per-file results, in path order.
    pub files: Vec<FileReport>,
    /// Number of files that failed to load.
    pub files_failed: usize,
}

impl RunResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files validated.
    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.files.len()
    }

    /// Returns true if any file has validator errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|f| f.report.has_errors())
    }

    /// Checks if any advisory meets or exceeds the given severity threshold.
    #[must_use]
    pub fn has_advisories_at(&self, severity: Severity) -> bool {
        self.files
            .iter()
            .flat_map(|f| &f.advisories)
            .any(|a| a.severity >= severity)
    }

    /// Returns true if the run should fail: errors, load failures, or
    /// advisories at `fail_on`.
    #[must_use]
    pub fn is_failure(&self, fail_on: Option<Severity>) -> bool {
        self.has_errors()
            || self.files_failed > 0
            || fail_on.is_some_and(|s| self.has_advisories_at(s))
    }

    /// Counts `(errors, warnings, advisories)` across all files.
    #[must_use]
    pub fn totals(&self) -> (usize, usize, usize) {
        self.files.iter().fold((0, 0, 0), |(e, w, a), f| {
            let (fe, fw) = f.report.counts();
            (e + fe, w + fw, a + f.advisories.len())
        })
    }
}
