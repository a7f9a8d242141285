//! DTO → query model conversion.

use super::config_dto::{CoreDto, DictionaryDto, DomainDto};
use super::{Access, Dictionary, DictionaryError, ReservedKeyword};
use crate::canon::CanonName;

use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Converts a [`DictionaryDto`] into a [`Dictionary`], merging every domain.
///
/// # Errors
///
/// Returns [`DictionaryError::UnknownAccess`] for a malformed verb permission
/// and [`DictionaryError::Keyword`] for an unmatchable reserved keyword.
pub(super) fn load(dto: DictionaryDto) -> Result<Dictionary, DictionaryError> {
    let mut dictionary = Dictionary::new();

    if let Some(core) = dto.core {
        merge_core(&mut dictionary, core)?;
    }

    for (name, domain) in dto.domains {
        let Some(domain) = domain else {
            debug!("Skipping empty domain: {name}");
            continue;
        };
        debug!("Merging domain: {name}");
        merge_domain(&mut dictionary, domain);
    }

    if let Some(domain) = dto.domain {
        debug!("Merging legacy single domain");
        merge_domain(&mut dictionary, domain);
    }

    let (actors, verbs, rel_types) = dictionary.stats();
    debug!("Dictionary ready: {actors} actors, {verbs} verbs, {rel_types} relationship types");

    Ok(dictionary)
}

fn merge_core(dictionary: &mut Dictionary, core: CoreDto) -> Result<(), DictionaryError> {
    if let Some(keywords) = core.keywords {
        for raw in &keywords.reserved {
            let keyword = ReservedKeyword::new(raw).map_err(|source| DictionaryError::Keyword {
                keyword: raw.clone(),
                source,
            })?;
            if let Some(keyword) = keyword {
                // first spelling wins
                dictionary
                    .reserved_keywords
                    .entry(keyword.key())
                    .or_insert(keyword);
            }
        }
    }

    for (verb, value) in core.verb_permissions {
        let access = parse_access(&verb, &value)?;
        dictionary
            .verb_permissions
            .insert(CanonName::new(&verb), access);
    }

    dictionary
        .relationship_types
        .extend(canon_all(&core.relationship_types));

    Ok(())
}

fn merge_domain(dictionary: &mut Dictionary, domain: DomainDto) {
    dictionary.actors.extend(canon_all(&domain.actors));
    dictionary.verbs.extend(canon_all(&domain.verbs));
    dictionary.entities.extend(canon_all(&domain.entities));
    dictionary
        .data_objects
        .extend(canon_all(&domain.data_objects));
    dictionary
        .relationship_types
        .extend(canon_all(&domain.relationships));

    for (actor, verbs) in domain.actor_verbs {
        let verbs: HashSet<CanonName> = canon_all(&verbs).collect();
        dictionary.union_allowed_verbs.extend(verbs.iter().cloned());
        merge_restriction(&mut dictionary.actor_verbs, &actor, verbs);
    }

    for (actor, perms) in domain.actor_data_perms {
        merge_restriction(&mut dictionary.actor_read, &actor, canon_all(&perms.read).collect());
        merge_restriction(
            &mut dictionary.actor_write,
            &actor,
            canon_all(&perms.write).collect(),
        );
    }
}

/// Unions `entries` into the actor's restriction set.
///
/// An empty list leaves the actor unrestricted.
fn merge_restriction(
    map: &mut HashMap<CanonName, HashSet<CanonName>>,
    actor: &str,
    entries: HashSet<CanonName>,
) {
    if entries.is_empty() {
        return;
    }
    map.entry(CanonName::new(actor)).or_default().extend(entries);
}

fn canon_all(names: &[String]) -> impl Iterator<Item = CanonName> + '_ {
    names.iter().map(|n| CanonName::new(n))
}

fn parse_access(verb: &str, value: &str) -> Result<Access, DictionaryError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "read" => Ok(Access::Read),
        "write" => Ok(Access::Write),
        _ => Err(DictionaryError::UnknownAccess {
            verb: verb.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_json(json: &str) -> Dictionary {
        load(serde_json::from_str(json).unwrap()).unwrap()
    }

    #[test]
    fn domains_are_merged() {
        let d = load_json(
            r#"{
                "domains": {
                    "kyc": {
                        "actors": ["Analyst"],
                        "actorVerbs": { "Analyst": ["Screen"] }
                    },
                    "payments": {
                        "actors": ["Analyst", "Operator"],
                        "actorVerbs": { "Analyst": ["Approve"] }
                    }
                }
            }"#,
        );
        assert!(d.has_actor("operator"));
        assert!(d.actor_allows("Analyst", "Screen"));
        assert!(d.actor_allows("Analyst", "Approve"));
        assert!(!d.actor_allows("Analyst", "Settle"));
        assert!(d.verb_permitted_by_any("Screen"));
        assert!(d.verb_permitted_by_any("Approve"));
    }

    #[test]
    fn legacy_domain_and_null_domain() {
        let d = load_json(
            r#"{
                "domains": { "unused": null },
                "domain": {
                    "actors": ["Teller"],
                    "entities": ["Account"],
                    "dataObjects": ["DO_Account"]
                }
            }"#,
        );
        assert!(d.has_actor("Teller"));
        assert!(d.catalogues_entity("account"));
        assert!(!d.catalogues_entity("Loan"));
        assert!(d.catalogues_data_object("DO_Account"));
        assert!(!d.catalogues_data_object("DO_Loan"));
    }

    #[test]
    fn empty_whitelist_does_not_feed_union() {
        let d = load_json(r#"{ "domains": { "x": { "actorVerbs": { "Auditor": [] } } } }"#);
        assert!(d.verb_permitted_by_any("Anything"));
        assert!(d.actor_allows("Auditor", "Anything"));
    }

    #[test]
    fn access_parsing_is_case_insensitive() {
        assert_eq!(parse_access("Go", " Write ").unwrap(), Access::Write);
        assert_eq!(parse_access("Go", "READ").unwrap(), Access::Read);
        assert!(parse_access("Go", "delete").is_err());
    }
}
