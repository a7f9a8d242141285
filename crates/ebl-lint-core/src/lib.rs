//! # ebl-lint-core
//!
//! Semantic validation for the Enterprise Business Language (EBL).
//!
//! This crate checks an already-parsed EBL syntax tree against a
//! configurable permission model. It includes:
//!
//! - [`Dictionary`] for the actors, verbs and permissions of a domain
//! - [`Document`] for the syntax tree, loaded from JSON
//! - [`Validator`] for applying the rule catalogue in one traversal
//! - [`Finding`] and [`ValidationReport`] for representing results
//!
//! ## Example
//!
//! ```ignore
//! use ebl_lint_core::{validate, Dictionary, Document, ValidatorConfig};
//!
//! let dictionary = Dictionary::from_file("dictionary.json".as_ref())?;
//! let doc = Document::from_file("loans.ebl.json".as_ref())?;
//!
//! let report = validate(&dictionary, ValidatorConfig::default(), &doc);
//! for warning in &report.warnings {
//!     println!("{warning}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
mod canon;
mod config;
pub mod dictionary;
mod rules;
mod types;
mod validator;
mod walker;

pub use ast::{Document, DocumentError};
pub use canon::{canon, CanonName};
pub use config::{Config, ConfigError, HeuristicsConfig, InputConfig, RuleConfig, ValidatorConfig};
pub use dictionary::{Access, Dictionary, DictionaryError, ReservedKeyword};
pub use rules::RuleId;
pub use types::{FileReport, Finding, FindingDiagnostic, RunResult, Severity, ValidationReport};
pub use validator::{validate, Validator};
pub use walker::{walk, Visit};
