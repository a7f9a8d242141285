//! Validator rule catalogue.
//!
//! Each rule has a stable code, a kebab-case name and a fixed bucket.
//! Configuration may disable a rule but never move it between buckets.

use crate::types::{Finding, Severity};

/// Identifies one validator rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleId {
    /// A field declares `min` greater than `max`.
    FieldBounds,
    /// An `Enum` field has no `values=` list.
    EnumWithoutValues,
    /// An entity references an undeclared data object.
    MissingDataRef,
    /// An enum property default is outside its declared values.
    EnumDefaultOutsideValues,
    /// A declared process actor never acts.
    UnusedProcessActor,
    /// An action line lacks the `Actor Verb` prefix.
    ActionShape,
    /// An action's actor is not in the dictionary.
    UnknownActor,
    /// An action's verb is not in the dictionary.
    UnknownVerb,
    /// No actor's whitelist contains the verb.
    VerbNeverPermitted,
    /// The actor's whitelist excludes the verb.
    ActorVerbNotAllowed,
    /// The actor lacks read or write permission on a data object.
    DataPermission,
    /// Free text contains a reserved keyword.
    ReservedKeyword,
    /// A relationship endpoint is not a known entity, asset or actor.
    UnknownRelationshipEndpoint,
    /// A relationship type is not recognised.
    UnknownRelationshipType,
    /// A hosted-on relationship without a catalogue data object.
    HostedOnWithoutCatalog,
    /// A declared name is missing from the dictionary's catalogue.
    DictionaryCoverage,
}

impl RuleId {
    /// Every rule, in code order.
    pub const ALL: [Self; 16] = [
        Self::FieldBounds,
        Self::EnumWithoutValues,
        Self::MissingDataRef,
        Self::EnumDefaultOutsideValues,
        Self::UnusedProcessActor,
        Self::ActionShape,
        Self::UnknownActor,
        Self::UnknownVerb,
        Self::VerbNeverPermitted,
        Self::ActorVerbNotAllowed,
        Self::DataPermission,
        Self::ReservedKeyword,
        Self::UnknownRelationshipEndpoint,
        Self::UnknownRelationshipType,
        Self::HostedOnWithoutCatalog,
        Self::DictionaryCoverage,
    ];

    /// Returns the stable rule code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::FieldBounds => "EBL001",
            Self::EnumWithoutValues => "EBL002",
            Self::MissingDataRef => "EBL003",
            Self::EnumDefaultOutsideValues => "EBL004",
            Self::UnusedProcessActor => "EBL005",
            Self::ActionShape => "EBL006",
            Self::UnknownActor => "EBL007",
            Self::UnknownVerb => "EBL008",
            Self::VerbNeverPermitted => "EBL009",
            Self::ActorVerbNotAllowed => "EBL010",
            Self::DataPermission => "EBL011",
            Self::ReservedKeyword => "EBL012",
            Self::UnknownRelationshipEndpoint => "EBL013",
            Self::UnknownRelationshipType => "EBL014",
            Self::HostedOnWithoutCatalog => "EBL015",
            Self::DictionaryCoverage => "EBL016",
        }
    }

    /// Returns the kebab-case rule name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FieldBounds => "field-bounds",
            Self::EnumWithoutValues => "enum-without-values",
            Self::MissingDataRef => "missing-data-ref",
            Self::EnumDefaultOutsideValues => "enum-default-outside-values",
            Self::UnusedProcessActor => "unused-process-actor",
            Self::ActionShape => "action-shape",
            Self::UnknownActor => "unknown-actor",
            Self::UnknownVerb => "unknown-verb",
            Self::VerbNeverPermitted => "verb-never-permitted",
            Self::ActorVerbNotAllowed => "actor-verb-not-allowed",
            Self::DataPermission => "data-permission",
            Self::ReservedKeyword => "reserved-keyword",
            Self::UnknownRelationshipEndpoint => "unknown-relationship-endpoint",
            Self::UnknownRelationshipType => "unknown-relationship-type",
            Self::HostedOnWithoutCatalog => "hosted-on-without-catalog",
            Self::DictionaryCoverage => "dictionary-coverage",
        }
    }

    /// Returns the bucket this rule reports into.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::FieldBounds | Self::MissingDataRef | Self::EnumDefaultOutsideValues => {
                Severity::Error
            }
            _ => Severity::Warning,
        }
    }

    /// Returns a one-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::FieldBounds => "DataObject field declares min greater than max",
            Self::EnumWithoutValues => "DataObject Enum field without a values= list",
            Self::MissingDataRef => "Entity dataRef names an undeclared DataObject",
            Self::EnumDefaultOutsideValues => "Enum property default not among its values",
            Self::UnusedProcessActor => "Process actor declared but never used in an Action",
            Self::ActionShape => "Action line must start with '<Actor> <Verb>'",
            Self::UnknownActor => "Action actor not in the dictionary",
            Self::UnknownVerb => "Action verb not in the dictionary",
            Self::VerbNeverPermitted => "Verb not permitted by any actor whitelist",
            Self::ActorVerbNotAllowed => "Actor's whitelist does not include the verb",
            Self::DataPermission => "Actor lacks read or write permission on a DataObject",
            Self::ReservedKeyword => "Free text contains a reserved keyword",
            Self::UnknownRelationshipEndpoint => {
                "Relationship endpoint is not a known Entity, ITAsset or Actor"
            }
            Self::UnknownRelationshipType => "Relationship type not recognised",
            Self::HostedOnWithoutCatalog => {
                "hosted_on relationship without a catalogue DataObject"
            }
            Self::DictionaryCoverage => "Declared name missing from the dictionary catalogue",
        }
    }

    /// Returns true for rules that only run when explicitly enabled.
    #[must_use]
    pub const fn is_opt_in(self) -> bool {
        matches!(self, Self::DictionaryCoverage)
    }

    /// Looks a rule up by code or name, case-insensitively.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(key) || r.name().eq_ignore_ascii_case(key))
    }

    /// Builds a finding for this rule.
    #[must_use]
    pub fn finding(self, message: impl Into<String>) -> Finding {
        Finding::new(self.code(), self.name(), self.severity(), message)
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_and_names_are_unique() {
        let codes: HashSet<_> = RuleId::ALL.iter().map(|r| r.code()).collect();
        let names: HashSet<_> = RuleId::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(codes.len(), RuleId::ALL.len());
        assert_eq!(names.len(), RuleId::ALL.len());
    }

    #[test]
    fn only_structural_rules_are_errors() {
        let errors: Vec<_> = RuleId::ALL
            .into_iter()
            .filter(|r| r.severity() == Severity::Error)
            .collect();
        assert_eq!(
            errors,
            vec![
                RuleId::FieldBounds,
                RuleId::MissingDataRef,
                RuleId::EnumDefaultOutsideValues
            ]
        );
    }

    #[test]
    fn lookup_by_code_or_name() {
        assert_eq!(RuleId::from_key("ebl008"), Some(RuleId::UnknownVerb));
        assert_eq!(RuleId::from_key("unknown-verb"), Some(RuleId::UnknownVerb));
        assert_eq!(RuleId::from_key("no-such-rule"), None);
    }

    #[test]
    fn finding_carries_rule_metadata() {
        let f = RuleId::MissingDataRef.finding("msg");
        assert_eq!(f.code, "EBL003");
        assert_eq!(f.rule, "missing-data-ref");
        assert_eq!(f.severity, Severity::Error);
    }
}
