//! # ebl-lint-heuristics
//!
//! Optional text heuristics for EBL definitions.
//!
//! Heuristics scan the definition text for compliance keywords. Their
//! findings are advisories, reported apart from the validator's errors and
//! warnings.
//!
//! ## Available Heuristics
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | PCI-DSS-001..003 | `pci-dss` | Card data encrypted, CVV never stored, payment actors |
//! | WIRE-001..002 | `wire-transfer` | Dual authorization, SWIFT validation |
//! | FRAUD-001..002 | `fraud-screening` | Fraud and AML screening |
//! | SOX-001..002 | `sox` | Segregation of duties, audited modifications |
//! | DATA-001 | `sensitive-data` | Sensitive identifiers encrypted or masked |
//! | TXN-001..002 | `transaction-integrity` | Rollback logic, balance checks |
//! | AUDIT-001 | `audit-trail` | Audit logging for critical operations |
//!
//! ## Usage
//!
//! ```ignore
//! use ebl_lint_heuristics::{scan, Preset};
//!
//! let advisories = scan(&Preset::Banking.rules(), &document.text());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod banking;
mod presets;
mod rule;

pub use presets::{all_rules, banking_rules, Preset};
pub use rule::{scan, HeuristicBox, HeuristicRule, ScanContext};

/// Re-export core types for convenience.
pub use ebl_lint_core::{Finding, Severity};
