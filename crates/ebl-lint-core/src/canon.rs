//! Identifier canonicalization.
//!
//! Dictionary entries and syntax-tree names are written with inconsistent
//! casing and punctuation (`Payment-Processor`, `paymentProcessor`). Every
//! comparison against the dictionary goes through [`canon`] so both sides
//! meet on the same key.

use std::borrow::Borrow;
use std::fmt;

/// Normalizes an identifier: lowercase ASCII letters, digits and `_` only.
///
/// Total and idempotent. Every other character (whitespace, punctuation,
/// non-ASCII) is dropped. Callers holding an absent name pass `""`.
#[must_use]
pub fn canon(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A canonical identifier key.
///
/// Can only be built through [`CanonName::new`], so holding one proves the
/// value is already normalized.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonName(String);

impl CanonName {
    /// Canonicalizes `raw` into a key.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(canon(raw))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if nothing survived canonicalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Borrow<str> for CanonName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_case_and_punctuation() {
        assert_eq!(canon("Pay-Ment_Processor"), "payment_processor");
        assert_eq!(canon("Pay-Ment_Processor"), canon("payment_processor"));
        assert_eq!(canon("PaymentProcessor"), canon("paymentprocessor"));
        assert_eq!(canon("  Loan Officer! "), "loanofficer");
    }

    #[test]
    fn underscore_is_significant() {
        assert_ne!(canon("hosted_on"), canon("hostedon"));
    }

    #[test]
    fn is_idempotent() {
        for raw in ["DO_Loan-Application", "ÄrgerOfficer", "", "a.b.c", "___"] {
            let once = canon(raw);
            assert_eq!(canon(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn drops_non_ascii() {
        assert_eq!(canon("Café"), "caf");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(canon(""), "");
        assert_eq!(canon("Go!"), "go");
        assert!(CanonName::new("--").is_empty());
    }

    #[test]
    fn canon_name_borrows_as_str() {
        let mut set = std::collections::HashSet::new();
        set.insert(CanonName::new("Underwriter"));
        assert!(set.contains("underwriter"));
    }
}
