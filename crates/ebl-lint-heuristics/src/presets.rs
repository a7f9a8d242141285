//! Heuristic presets.

use crate::banking::{
    AuditTrail, FraudScreening, PciDss, SensitiveData, Sox, TransactionIntegrity, WireTransfer,
};
use crate::rule::HeuristicBox;
use std::str::FromStr;

/// Preset configurations for the heuristic layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// No heuristics.
    #[default]
    None,
    /// Banking vertical scanners.
    Banking,
    /// Every available heuristic.
    All,
}

impl Preset {
    /// Returns the heuristics for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<HeuristicBox> {
        match self {
            Self::None => Vec::new(),
            Self::Banking => banking_rules(),
            Self::All => all_rules(),
        }
    }

    /// Returns the preset's configuration name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Banking => "banking",
            Self::All => "all",
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "banking" => Ok(Self::Banking),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown heuristics preset `{other}`, expected: none, banking, all"
            )),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the banking vertical heuristics.
///
/// Includes:
/// - `pci-dss` (PCI-DSS-001..003) - Card data protection
/// - `wire-transfer` (WIRE-001..002) - Dual authorization, SWIFT validation
/// - `fraud-screening` (FRAUD-001..002) - Fraud and AML screening
/// - `sox` (SOX-001..002) - Segregation of duties, audited modifications
/// - `sensitive-data` (DATA-001) - Encrypted or masked identifiers
/// - `transaction-integrity` (TXN-001..002) - Rollback and balance checks
/// - `audit-trail` (AUDIT-001) - Audit logging for critical operations
#[must_use]
pub fn banking_rules() -> Vec<HeuristicBox> {
    vec![
        Box::new(PciDss::new()),
        Box::new(WireTransfer::new()),
        Box::new(FraudScreening::new()),
        Box::new(Sox::new()),
        Box::new(SensitiveData::new()),
        Box::new(TransactionIntegrity::new()),
        Box::new(AuditTrail::new()),
    ]
}

/// Returns all available heuristics.
#[must_use]
pub fn all_rules() -> Vec<HeuristicBox> {
    banking_rules()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_rules() {
        assert!(Preset::None.rules().is_empty());
        assert_eq!(Preset::Banking.rules().len(), 7);
        assert!(Preset::All.rules().len() >= Preset::Banking.rules().len());
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!("Banking".parse::<Preset>(), Ok(Preset::Banking));
        assert_eq!("none".parse::<Preset>(), Ok(Preset::None));
        assert!("retail".parse::<Preset>().is_err());
        assert_eq!(Preset::All.to_string(), "all");
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<&str> = all_rules().iter().flat_map(|r| r.codes().iter().copied()).collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
        assert_eq!(total, 13);
    }
}
