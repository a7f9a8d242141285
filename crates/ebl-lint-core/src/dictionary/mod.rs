//! The dictionary: a configurable, query-only permission model.
//!
//! # Architecture
//!
//! ```text
//! JSON text
//!   ↓ serde (DTO layer)
//! config_dto types
//!   ↓ canonicalize + merge domains
//! Dictionary (immutable query model)
//! ```
//!
//! # Permissive defaults
//!
//! An actor without a verb whitelist may perform every verb, and an actor
//! without a read (or write) list may read (or write) every data object.
//! An empty list counts as absent. Only a non-empty list restricts.

use crate::canon::{canon, CanonName};

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod config_dto;
mod keyword;
mod loader;

pub use keyword::ReservedKeyword;

/// Errors from reading and loading a dictionary document.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    /// The dictionary file could not be read.
    #[error("Failed to read dictionary {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not have the expected shape.
    #[error("Dictionary JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A `verbPermissions` value is neither `read` nor `write`.
    #[error("verbPermissions.{verb}: unknown access `{value}`, expected: read, write")]
    UnknownAccess {
        /// The verb whose permission is malformed.
        verb: String,
        /// The invalid value.
        value: String,
    },

    /// A reserved keyword could not be compiled into a matcher.
    #[error("keywords.reserved: cannot match `{keyword}`: {source}")]
    Keyword {
        /// The offending keyword.
        keyword: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}

/// Data-access mode implied by a verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// The verb reads data objects.
    Read,
    /// The verb writes data objects.
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Immutable dictionary built once from a configuration document.
///
/// All keys are [`CanonName`]s and every query canonicalizes its
/// arguments first. Reserved keywords are the exception: they keep their
/// configured spelling and match free text as whole words.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    reserved_keywords: BTreeMap<String, ReservedKeyword>,
    verb_permissions: HashMap<CanonName, Access>,
    relationship_types: HashSet<CanonName>,
    actors: HashSet<CanonName>,
    verbs: HashSet<CanonName>,
    entities: HashSet<CanonName>,
    data_objects: HashSet<CanonName>,
    actor_verbs: HashMap<CanonName, HashSet<CanonName>>,
    actor_read: HashMap<CanonName, HashSet<CanonName>>,
    actor_write: HashMap<CanonName, HashSet<CanonName>>,
    union_allowed_verbs: HashSet<CanonName>,
}

impl Dictionary {
    /// Creates an empty dictionary that recognizes nothing and restricts nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a dictionary from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn from_file(path: &Path) -> Result<Self, DictionaryError> {
        let content = std::fs::read_to_string(path).map_err(|e| DictionaryError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let dictionary = Self::from_json(&content)?;
        debug!("Loaded dictionary from {}", path.display());
        Ok(dictionary)
    }

    /// Parses a dictionary from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a verb permission is unknown.
    pub fn from_json(content: &str) -> Result<Self, DictionaryError> {
        let dto: config_dto::DictionaryDto = serde_json::from_str(content)?;
        loader::load(dto)
    }

    /// Returns true if `name` is a recognized actor.
    #[must_use]
    pub fn has_actor(&self, name: &str) -> bool {
        self.actors.contains(canon(name).as_str())
    }

    /// Returns true if `name` is a recognized verb.
    #[must_use]
    pub fn has_verb(&self, name: &str) -> bool {
        self.verbs.contains(canon(name).as_str())
    }

    /// Returns true if `name` is a recognized relationship type.
    #[must_use]
    pub fn is_relationship_type(&self, name: &str) -> bool {
        self.relationship_types.contains(canon(name).as_str())
    }

    /// Returns true if `actor` may perform `verb`.
    ///
    /// An actor without a whitelist may perform any verb.
    #[must_use]
    pub fn actor_allows(&self, actor: &str, verb: &str) -> bool {
        self.actor_verbs
            .get(canon(actor).as_str())
            .map_or(true, |allowed| allowed.contains(canon(verb).as_str()))
    }

    /// Returns true if at least one actor's whitelist contains `verb`.
    ///
    /// While no actor has a whitelist, every verb is permitted.
    #[must_use]
    pub fn verb_permitted_by_any(&self, verb: &str) -> bool {
        self.union_allowed_verbs.is_empty()
            || self.union_allowed_verbs.contains(canon(verb).as_str())
    }

    /// Returns true if `actor` may read `data_object`.
    #[must_use]
    pub fn can_read(&self, actor: &str, data_object: &str) -> bool {
        Self::permits(&self.actor_read, actor, data_object)
    }

    /// Returns true if `actor` may write `data_object`.
    #[must_use]
    pub fn can_write(&self, actor: &str, data_object: &str) -> bool {
        Self::permits(&self.actor_write, actor, data_object)
    }

    /// Returns the access mode `verb` implies, if declared.
    #[must_use]
    pub fn permission_for_verb(&self, verb: &str) -> Option<Access> {
        self.verb_permissions.get(canon(verb).as_str()).copied()
    }

    /// Iterates reserved keywords sorted by lowercased spelling.
    pub fn reserved_keywords(&self) -> impl Iterator<Item = &ReservedKeyword> {
        self.reserved_keywords.values()
    }

    /// Iterates the reserved keywords found in `text`, each once, sorted.
    pub fn reserved_in<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a ReservedKeyword> + 'a {
        self.reserved_keywords().filter(move |kw| kw.is_match(text))
    }

    /// Returns the recognized relationship types, sorted.
    #[must_use]
    pub fn relationship_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.relationship_types.iter().map(CanonName::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Returns true if `name` is in the entity catalogue, or no catalogue exists.
    #[must_use]
    pub fn catalogues_entity(&self, name: &str) -> bool {
        self.entities.is_empty() || self.entities.contains(canon(name).as_str())
    }

    /// Returns true if `name` is in the data-object catalogue, or no catalogue exists.
    #[must_use]
    pub fn catalogues_data_object(&self, name: &str) -> bool {
        self.data_objects.is_empty() || self.data_objects.contains(canon(name).as_str())
    }

    /// Returns true if any actor is catalogued.
    #[must_use]
    pub fn has_actor_catalogue(&self) -> bool {
        !self.actors.is_empty()
    }

    /// Returns `(actors, verbs, relationship types)` counts for logging.
    #[must_use]
    pub fn stats(&self) -> (usize, usize, usize) {
        (
            self.actors.len(),
            self.verbs.len(),
            self.relationship_types.len(),
        )
    }

    fn permits(
        perms: &HashMap<CanonName, HashSet<CanonName>>,
        actor: &str,
        data_object: &str,
    ) -> bool {
        perms
            .get(canon(actor).as_str())
            .map_or(true, |objects| objects.contains(canon(data_object).as_str()))
    }
}
