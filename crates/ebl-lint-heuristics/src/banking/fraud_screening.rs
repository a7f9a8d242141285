//! Fraud and AML screening.

use crate::rule::{HeuristicRule, ScanContext};
use ebl_lint_core::{Finding, Severity};

/// Code prefix for fraud heuristics.
pub const CODE: &str = "FRAUD";

/// Name for fraud heuristics.
pub const NAME: &str = "fraud-screening";

const HIGH_RISK: [&str; 3] = ["Transfer", "Payment", "Withdrawal"];

/// Flags money movement without fraud or sanctions screening.
#[derive(Debug, Clone, Copy, Default)]
pub struct FraudScreening;

impl FraudScreening {
    /// Creates the heuristic.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HeuristicRule for FraudScreening {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn codes(&self) -> &'static [&'static str] {
        &["FRAUD-001", "FRAUD-002"]
    }

    fn description(&self) -> &'static str {
        "High-risk transactions need fraud and AML screening"
    }

    fn max_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        if !ctx.contains_any(&["FraudCheck", "Screen", "Fraud"]) {
            for kind in HIGH_RISK.iter().filter(|k| ctx.contains(k)) {
                findings.push(
                    Finding::new(
                        "FRAUD-001",
                        NAME,
                        Severity::Warning,
                        format!("Transaction type '{kind}' should include fraud screening"),
                    )
                    .with_suggestion("Add FraudDetectionEngine or FraudAnalyst to actors"),
                );
            }
        }

        let international = ctx.contains_any(&["International", "Cross-Border"]);
        if international
            && ctx.contains("Transfer")
            && !ctx.contains_any(&["AML", "Sanction", "Screen"])
        {
            findings.push(
                Finding::new(
                    "FRAUD-002",
                    NAME,
                    Severity::Error,
                    "International transfers must include AML/sanctions screening",
                )
                .with_suggestion("Add sanctions screening and AML checks"),
            );
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(text: &str) -> Vec<String> {
        FraudScreening::new()
            .check(&ScanContext::new(text))
            .into_iter()
            .map(|f| f.code)
            .collect()
    }

    #[test]
    fn one_finding_per_high_risk_kind() {
        assert_eq!(
            codes("Transfer then Withdrawal"),
            vec!["FRAUD-001", "FRAUD-001"]
        );
        assert!(codes("Transfer after FraudCheck").is_empty());
    }

    #[test]
    fn international_transfer_needs_aml() {
        assert_eq!(
            codes("International Transfer with Fraud review"),
            vec!["FRAUD-002"]
        );
        assert!(codes("International Transfer after Sanction Screen").is_empty());
    }
}
