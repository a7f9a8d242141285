//! Heuristic rule trait and scan context.

use ebl_lint_core::{Finding, Severity};
use tracing::debug;

/// Text handed to every heuristic: the EBL source when available,
/// otherwise a rendering of the syntax tree.
#[derive(Debug)]
pub struct ScanContext<'a> {
    text: &'a str,
    lowered: String,
}

impl<'a> ScanContext<'a> {
    /// Creates a scan context over `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lowered: text.to_lowercase(),
        }
    }

    /// Returns the scanned text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Case-sensitive substring test.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    /// Returns true if any needle occurs (case-sensitive).
    #[must_use]
    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.text.contains(n))
    }

    /// Case-insensitive substring test.
    #[must_use]
    pub fn contains_ci(&self, needle: &str) -> bool {
        self.lowered.contains(&needle.to_lowercase())
    }
}

/// An unstructured text scanner.
///
/// Heuristics are advisories: they look for keywords in the text and never
/// consult the syntax tree, so they are reported apart from validator
/// findings.
///
/// # Example
///
/// ```ignore
/// use ebl_lint_heuristics::{HeuristicRule, ScanContext};
/// use ebl_lint_core::{Finding, Severity};
///
/// pub struct NoTodo;
///
/// impl HeuristicRule for NoTodo {
///     fn name(&self) -> &'static str { "no-todo" }
///     fn code(&self) -> &'static str { "TODO" }
///     fn codes(&self) -> &'static [&'static str] { &["TODO-001"] }
///
///     fn check(&self, ctx: &ScanContext) -> Vec<Finding> {
///         if ctx.contains("TODO") {
///             vec![Finding::new("TODO-001", self.name(), Severity::Info, "Unfinished definition")]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait HeuristicRule: Send + Sync {
    /// Returns the kebab-case name of this heuristic group (e.g., "pci-dss").
    fn name(&self) -> &'static str;

    /// Returns the code prefix shared by this group's findings (e.g., "PCI-DSS").
    fn code(&self) -> &'static str;

    /// Returns every finding code this heuristic can emit.
    fn codes(&self) -> &'static [&'static str];

    /// Returns a brief description of what this heuristic checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the highest severity this heuristic reports.
    fn max_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Scans the text and returns any advisories found.
    fn check(&self, ctx: &ScanContext) -> Vec<Finding>;
}

/// Type alias for boxed heuristic trait objects.
pub type HeuristicBox = Box<dyn HeuristicRule>;

/// Runs every heuristic over `text`, in order.
#[must_use]
pub fn scan(rules: &[HeuristicBox], text: &str) -> Vec<Finding> {
    let ctx = ScanContext::new(text);
    let findings: Vec<Finding> = rules.iter().flat_map(|rule| rule.check(&ctx)).collect();
    debug!("{} heuristic(s) produced {} advisories", rules.len(), findings.len());
    findings
}
