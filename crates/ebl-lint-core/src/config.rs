//! Configuration types for ebl-lint.

use crate::rules::RuleId;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

/// Top-level configuration for ebl-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default dictionary path. When loaded with [`Config::from_file`], a
    /// relative path is resolved against the config file's directory.
    #[serde(default)]
    pub dictionary: Option<PathBuf>,

    /// Severity threshold at which heuristic advisories fail the run.
    /// Unset means advisories never fail it.
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Validator options.
    #[serde(default)]
    pub validator: ValidatorConfig,

    /// Input discovery options.
    #[serde(default)]
    pub input: InputConfig,

    /// Heuristic layer options.
    #[serde(default)]
    pub heuristics: HeuristicsConfig,

    /// Per-rule configurations, keyed by rule name or code.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// A relative `dictionary` path is anchored at the file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config = Self::parse(&content)?;
        if let (Some(dictionary), Some(base)) = (&config.dictionary, path.parent()) {
            if dictionary.is_relative() {
                config.dictionary = Some(base.join(dictionary));
            }
        }
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule key (name or code) is enabled.
    ///
    /// Keys are matched case-insensitively; unlisted rules are enabled.
    #[must_use]
    pub fn is_enabled(&self, key: &str) -> bool {
        self.rules
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .all(|(_, c)| c.enabled.unwrap_or(true))
    }

    /// Checks if a validator rule is enabled under either its name or code.
    ///
    /// Opt-in rules additionally require their validator switch.
    #[must_use]
    pub fn is_rule_enabled(&self, rule: RuleId) -> bool {
        if rule == RuleId::DictionaryCoverage && !self.validator.dictionary_coverage {
            return false;
        }
        self.is_enabled(rule.code()) && self.is_enabled(rule.name())
    }

    /// Returns the validator rules disabled by this configuration.
    #[must_use]
    pub fn disabled_rules(&self) -> BTreeSet<RuleId> {
        RuleId::ALL
            .into_iter()
            .filter(|r| !self.is_rule_enabled(*r))
            .collect()
    }

    /// Returns `[rules.*]` keys that match no validator rule and are not in
    /// `extra` (typically the heuristic codes).
    #[must_use]
    pub fn unknown_rule_keys<'a>(&'a self, extra: &[&str]) -> Vec<&'a str> {
        let mut keys: Vec<&str> = self
            .rules
            .keys()
            .map(String::as_str)
            .filter(|k| RuleId::from_key(k).is_none())
            .filter(|k| !extra.iter().any(|e| e.eq_ignore_ascii_case(k)))
            .collect();
        keys.sort_unstable();
        keys
    }
}

/// Validator options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Warn when a relationship endpoint is not a known entity, asset or actor.
    pub warn_unknown_assets: bool,

    /// Enable the opt-in dictionary coverage rule.
    pub dictionary_coverage: bool,

    /// Prefix that marks data-object tokens in action lines.
    pub data_object_prefix: String,

    /// Relationship type that requires a catalogue data object.
    pub hosted_on_type: String,

    /// Data objects that satisfy the hosted-on catalogue requirement.
    pub hosted_on_catalogs: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            warn_unknown_assets: true,
            dictionary_coverage: false,
            data_object_prefix: "DO_".to_string(),
            hosted_on_type: "hosted_on".to_string(),
            hosted_on_catalogs: vec![
                "DO_ApplicationCatalog".to_string(),
                "DO_PlatformRegistry".to_string(),
            ],
        }
    }
}

/// Input discovery options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// File-name suffix of syntax tree documents.
    pub suffix: String,

    /// Glob patterns to exclude when walking a directory.
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    pub respect_gitignore: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            suffix: ".ebl.json".to_string(),
            exclude: vec!["**/target/**".to_string()],
            respect_gitignore: true,
        }
    }
}

/// Heuristic layer options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// Preset name: `none`, `banking` or `all`.
    pub preset: String,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            preset: "none".to_string(),
        }
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validator.warn_unknown_assets);
        assert!(!config.validator.dictionary_coverage);
        assert_eq!(config.validator.data_object_prefix, "DO_");
        assert_eq!(config.input.suffix, ".ebl.json");
        assert_eq!(config.heuristics.preset, "none");
        assert!(config.fail_on.is_none());
        assert_eq!(
            config.disabled_rules().into_iter().collect::<Vec<_>>(),
            vec![RuleId::DictionaryCoverage]
        );
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
dictionary = "dictionary/banking.json"
fail_on = "warning"

[validator]
warn_unknown_assets = false
hosted_on_catalogs = ["DO_Cmdb"]

[heuristics]
preset = "banking"

[rules.unknown-verb]
enabled = false

[rules.EBL012]
enabled = false

[rules.PCI-DSS-001]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(
            config.dictionary,
            Some(PathBuf::from("dictionary/banking.json"))
        );
        assert_eq!(config.fail_on, Some(Severity::Warning));
        assert!(!config.validator.warn_unknown_assets);
        assert_eq!(config.validator.hosted_on_type, "hosted_on");
        assert_eq!(config.validator.hosted_on_catalogs, vec!["DO_Cmdb"]);
        assert_eq!(config.heuristics.preset, "banking");

        assert!(!config.is_rule_enabled(RuleId::UnknownVerb));
        assert!(!config.is_rule_enabled(RuleId::ReservedKeyword));
        assert!(config.is_rule_enabled(RuleId::UnknownActor));
        assert!(!config.is_enabled("pci-dss-001"));
        assert!(config.unknown_rule_keys(&["PCI-DSS-001"]).is_empty());
        assert_eq!(config.unknown_rule_keys(&[]), vec!["PCI-DSS-001"]);
    }

    #[test]
    fn test_coverage_requires_switch() {
        let config = Config::parse("[validator]\ndictionary_coverage = true\n").unwrap();
        assert!(config.is_rule_enabled(RuleId::DictionaryCoverage));
        assert!(config.disabled_rules().is_empty());
    }

    #[test]
    fn test_from_file_anchors_dictionary() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("ebl-lint.toml");

        std::fs::write(&path, "dictionary = \"dict/banking.json\"\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.dictionary, Some(tmp.path().join("dict/banking.json")));

        let absolute = tmp.path().join("elsewhere.json");
        std::fs::write(&path, format!("dictionary = {:?}\n", absolute.display().to_string())).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.dictionary, Some(absolute));

        // parse alone leaves the path untouched
        let config = Config::parse("dictionary = \"dict.json\"").unwrap();
        assert_eq!(config.dictionary, Some(PathBuf::from("dict.json")));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("fail_on = \"fatal\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
