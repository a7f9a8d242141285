//! Sensitive banking identifiers.

use crate::rule::{HeuristicRule, ScanContext};
use ebl_lint_core::{Finding, Severity};

/// Code prefix for sensitive-data heuristics.
pub const CODE: &str = "DATA";

/// Name for sensitive-data heuristics.
pub const NAME: &str = "sensitive-data";

const SENSITIVE_FIELDS: [&str; 6] = ["SSN", "TIN", "AccountNumber", "RoutingNumber", "IBAN", "SWIFT"];

/// Flags sensitive identifiers in definitions that never mention encryption
/// or masking.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensitiveData;

impl SensitiveData {
    /// Creates the heuristic.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HeuristicRule for SensitiveData {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn codes(&self) -> &'static [&'static str] {
        &["DATA-001"]
    }

    fn description(&self) -> &'static str {
        "Sensitive identifiers must be encrypted or masked"
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Finding> {
        if ctx.contains_ci("encrypted") || ctx.contains_ci("masked") {
            return Vec::new();
        }
        SENSITIVE_FIELDS
            .iter()
            .filter(|field| ctx.contains(field))
            .map(|field| {
                Finding::new(
                    "DATA-001",
                    NAME,
                    Severity::Warning,
                    format!("Sensitive field '{field}' should be encrypted or masked"),
                )
                .with_suggestion("Add encryption or masking to sensitive data fields")
            })
            .collect()
    }
}
