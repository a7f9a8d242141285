//! Transaction atomicity and balance checks.

use crate::rule::{HeuristicRule, ScanContext};
use ebl_lint_core::{Finding, Severity};

/// Code prefix for transaction heuristics.
pub const CODE: &str = "TXN";

/// Name for transaction heuristics.
pub const NAME: &str = "transaction-integrity";

/// Flags transactions without compensation and debits without balance checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionIntegrity;

impl TransactionIntegrity {
    /// Creates the heuristic.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HeuristicRule for TransactionIntegrity {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn codes(&self) -> &'static [&'static str] {
        &["TXN-001", "TXN-002"]
    }

    fn description(&self) -> &'static str {
        "Transactions need rollback logic and debits need balance checks"
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        if ctx.contains_any(&["Transaction", "Transfer"])
            && !ctx.contains_any(&["Rollback", "Compensate"])
        {
            findings.push(
                Finding::new(
                    "TXN-001",
                    NAME,
                    Severity::Info,
                    "Consider adding rollback/compensation logic for transaction integrity",
                )
                .with_suggestion("Add error handling with rollback or compensating transactions"),
            );
        }

        if ctx.contains_any(&["Debit", "Withdraw"])
            && !ctx.contains_any(&["CheckBalance", "ValidateBalance"])
        {
            findings.push(
                Finding::new(
                    "TXN-002",
                    NAME,
                    Severity::Warning,
                    "Debit operations should validate sufficient balance",
                )
                .with_suggestion("Add balance validation before debit"),
            );
        }

        findings
    }
}
