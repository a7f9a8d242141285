//! Wire transfer and SWIFT messaging.

use crate::rule::{HeuristicRule, ScanContext};
use ebl_lint_core::{Finding, Severity};
use regex::Regex;
use std::sync::LazyLock;

/// Code prefix for wire transfer heuristics.
pub const CODE: &str = "WIRE";

/// Name for wire transfer heuristics.
pub const NAME: &str = "wire-transfer";

#[allow(clippy::expect_used)]
static ACTORS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Actors\s*:\s*\[(.*?)\]").expect("actors pattern compiles"));

/// Flags wire transfers without dual authorization or message validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct WireTransfer;

impl WireTransfer {
    /// Creates the heuristic.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HeuristicRule for WireTransfer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn codes(&self) -> &'static [&'static str] {
        &["WIRE-001", "WIRE-002"]
    }

    fn description(&self) -> &'static str {
        "Wire transfers need dual authorization and SWIFT validation"
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        if ctx.contains_any(&["WireTransfer", "SWIFT", "Fedwire"]) && ctx.contains("Approve") {
            // only the first Actors header is inspected
            let single_approver = ACTORS_RE
                .captures(ctx.text())
                .is_some_and(|caps| caps[1].split(',').count() < 2);
            if single_approver {
                findings.push(
                    Finding::new(
                        "WIRE-001",
                        NAME,
                        Severity::Warning,
                        "Wire transfers typically require dual authorization",
                    )
                    .with_suggestion("Consider adding second approver for high-value transfers"),
                );
            }
        }

        if ctx.contains_any(&["SWIFT", "MT103", "MT202"]) && !ctx.contains_any(&["Validate", "Verify"]) {
            findings.push(
                Finding::new(
                    "WIRE-002",
                    NAME,
                    Severity::Warning,
                    "SWIFT messages should include validation step",
                )
                .with_suggestion("Add validation for SWIFT message format and completeness"),
            );
        }

        findings
    }
}
