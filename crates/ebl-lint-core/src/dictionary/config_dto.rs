//! JSON deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization of a dictionary
//! document. They are converted to the query model via the loader.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw JSON representation of a dictionary document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryDto {
    /// Cross-domain vocabulary: keywords, verb permissions, relationship types.
    #[serde(default)]
    pub core: Option<CoreDto>,

    /// Named business domains, merged into one dictionary.
    ///
    /// A `null` entry is tolerated and skipped.
    #[serde(default)]
    pub domains: BTreeMap<String, Option<DomainDto>>,

    /// Legacy single-domain form used by per-vertical dictionaries.
    #[serde(default)]
    pub domain: Option<DomainDto>,
}

/// The `core` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreDto {
    /// Reserved keyword list.
    #[serde(default)]
    pub keywords: Option<KeywordsDto>,

    /// Verb → `"read"` / `"write"`.
    #[serde(default)]
    pub verb_permissions: BTreeMap<String, String>,

    /// Recognized relationship types.
    #[serde(default)]
    pub relationship_types: Vec<String>,
}

/// The `core.keywords` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordsDto {
    /// Words that must not appear unquoted in free text.
    #[serde(default)]
    pub reserved: Vec<String>,
}

/// One business domain.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDto {
    /// Actor names.
    #[serde(default)]
    pub actors: Vec<String>,
    /// Verb names.
    #[serde(default)]
    pub verbs: Vec<String>,
    /// Catalogued entity names.
    #[serde(default)]
    pub entities: Vec<String>,
    /// Catalogued data-object names.
    #[serde(default)]
    pub data_objects: Vec<String>,
    /// Additional relationship types for this domain.
    #[serde(default)]
    pub relationships: Vec<String>,
    /// Actor → whitelisted verbs.
    #[serde(default)]
    pub actor_verbs: BTreeMap<String, Vec<String>>,
    /// Actor → data-object read/write permissions.
    #[serde(default)]
    pub actor_data_perms: BTreeMap<String, DataPermsDto>,
}

/// Read/write data-object lists for one actor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataPermsDto {
    /// Data objects the actor may read.
    #[serde(default)]
    pub read: Vec<String>,
    /// Data objects the actor may write.
    #[serde(default)]
    pub write: Vec<String>,
}
