//! Sarbanes-Oxley controls.

use crate::rule::{HeuristicRule, ScanContext};
use ebl_lint_core::{Finding, Severity};

/// Code prefix for SOX heuristics.
pub const CODE: &str = "SOX";

/// Name for SOX heuristics.
pub const NAME: &str = "sox";

/// Flags missing segregation of duties and unaudited modifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sox;

impl Sox {
    /// Creates the heuristic.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HeuristicRule for Sox {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn codes(&self) -> &'static [&'static str] {
        &["SOX-001", "SOX-002"]
    }

    fn description(&self) -> &'static str {
        "Segregation of duties and audited data modification"
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        if ctx.contains("Process")
            && ctx.contains("CreateTransaction")
            && ctx.contains("ApproveTransaction")
        {
            findings.push(
                Finding::new(
                    "SOX-001",
                    NAME,
                    Severity::Info,
                    "Verify segregation of duties: creator should not be approver",
                )
                .with_suggestion("Ensure different actors for transaction creation and approval"),
            );
        }

        if ctx.contains_any(&["Delete", "Update"]) && !ctx.contains_any(&["Audit", "Log"]) {
            findings.push(
                Finding::new(
                    "SOX-002",
                    NAME,
                    Severity::Warning,
                    "Data modifications should be audited",
                )
                .with_suggestion("Add audit logging for compliance"),
            );
        }

        findings
    }
}
