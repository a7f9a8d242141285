//! PCI-DSS card-data handling.
//!
//! # Detected Patterns
//!
//! - Card numbers (`CardNumber`, `PAN`, `card_number`) without `encrypted`
//!   or `token` anywhere in the definition
//! - CVV/CVC data alongside `persist` or `store`
//! - Payment operations not assigned to a payment processor or gateway

use crate::rule::{HeuristicRule, ScanContext};
use ebl_lint_core::{Finding, Severity};

/// Code prefix for PCI-DSS heuristics.
pub const CODE: &str = "PCI-DSS";

/// Name for PCI-DSS heuristics.
pub const NAME: &str = "pci-dss";

const PAYMENT_OPERATIONS: [&str; 3] = ["ProcessPayment", "AuthorizeCard", "CapturePayment"];

/// Flags card data that is stored or processed outside PCI-DSS expectations.
#[derive(Debug, Clone, Copy, Default)]
pub struct PciDss;

impl PciDss {
    /// Creates the heuristic.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HeuristicRule for PciDss {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn codes(&self) -> &'static [&'static str] {
        &["PCI-DSS-001", "PCI-DSS-002", "PCI-DSS-003"]
    }

    fn description(&self) -> &'static str {
        "Card data must be protected and processed by payment actors"
    }

    fn max_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        let has_card_number = ctx.contains_any(&["CardNumber", "PAN"]) || ctx.contains_ci("card_number");
        if has_card_number && !ctx.contains_ci("encrypted") && !ctx.contains_ci("token") {
            findings.push(
                Finding::new(
                    "PCI-DSS-001",
                    NAME,
                    Severity::Error,
                    "Card numbers must be encrypted or tokenized",
                )
                .with_suggestion("Add 'encrypted: true' or use tokenization for card data"),
            );
        }

        if ctx.contains_any(&["CVV", "CVC"]) && (ctx.contains_ci("persist") || ctx.contains_ci("store")) {
            findings.push(
                Finding::new(
                    "PCI-DSS-002",
                    NAME,
                    Severity::Error,
                    "CVV/CVC data must never be stored after authorization",
                )
                .with_suggestion("Remove CVV storage; collect only for authorization"),
            );
        }

        if !ctx.contains_any(&["PaymentProcessor", "PaymentGateway"]) {
            for operation in PAYMENT_OPERATIONS.iter().filter(|op| ctx.contains(op)) {
                findings.push(
                    Finding::new(
                        "PCI-DSS-003",
                        NAME,
                        Severity::Warning,
                        format!(
                            "Payment operation '{operation}' should be performed by PaymentProcessor or PaymentGateway"
                        ),
                    )
                    .with_suggestion("Assign to PaymentProcessor or PaymentGateway actor"),
                );
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(text: &str) -> Vec<String> {
        PciDss::new()
            .check(&ScanContext::new(text))
            .into_iter()
            .map(|f| f.code)
            .collect()
    }

    #[test]
    fn unprotected_card_number() {
        assert_eq!(codes("cardNumber: String, CardNumber"), vec!["PCI-DSS-001"]);
        assert!(codes("CardNumber: String (encrypted)").is_empty());
        assert!(codes("PAN via Tokenization service").is_empty());
    }

    #[test]
    fn stored_cvv() {
        assert_eq!(codes("CVV2 kept in store"), vec!["PCI-DSS-002"]);
        assert!(codes("CVV checked at authorization").is_empty());
    }

    #[test]
    fn payment_operations_need_processor() {
        let findings = PciDss::new().check(&ScanContext::new(
            "- Cashier ProcessPayment DO_Sale\n- Cashier CapturePayment DO_Sale",
        ));
        let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Payment operation 'ProcessPayment' should be performed by PaymentProcessor or PaymentGateway",
                "Payment operation 'CapturePayment' should be performed by PaymentProcessor or PaymentGateway",
            ]
        );
        assert!(codes("- PaymentGateway ProcessPayment DO_Sale").is_empty());
    }
}
