//! Audit trail for critical operations.

use crate::rule::{HeuristicRule, ScanContext};
use ebl_lint_core::{Finding, Severity};

/// Code prefix for audit heuristics.
pub const CODE: &str = "AUDIT";

/// Name for audit heuristics.
pub const NAME: &str = "audit-trail";

const CRITICAL_OPERATIONS: [&str; 5] = ["Transfer", "Approve", "Authorize", "Update", "Delete"];

/// Flags critical operations in definitions without any audit logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditTrail;

impl AuditTrail {
    /// Creates the heuristic.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HeuristicRule for AuditTrail {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn codes(&self) -> &'static [&'static str] {
        &["AUDIT-001"]
    }

    fn description(&self) -> &'static str {
        "Critical operations must be audited"
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Finding> {
        if ctx.contains_any(&["Audit", "Log"]) {
            return Vec::new();
        }
        CRITICAL_OPERATIONS
            .iter()
            .filter(|op| ctx.contains(op))
            .map(|op| {
                Finding::new(
                    "AUDIT-001",
                    NAME,
                    Severity::Warning,
                    format!("Critical operation '{op}' should have audit logging"),
                )
                .with_suggestion("Add audit trail for regulatory compliance")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_critical_operation_is_reported() {
        let findings = AuditTrail::new().check(&ScanContext::new(
            "- Manager Approve DO_Loan\n- Clerk Delete DO_Draft",
        ));
        let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Critical operation 'Approve' should have audit logging",
                "Critical operation 'Delete' should have audit logging",
            ]
        );
    }

    #[test]
    fn logging_silences() {
        assert!(AuditTrail::new()
            .check(&ScanContext::new("- Manager Approve DO_Loan\n- Manager Log DO_Loan"))
            .is_empty());
    }
}
