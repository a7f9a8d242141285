//! Semantic validator.
//!
//! [`Validator`] is a [`Visit`] implementation that applies the rule
//! catalogue to one syntax tree, accumulating errors and warnings in
//! traversal order. Entity references, enum defaults and hosted-on
//! catalogues are resolved at end-of-document, so declaration order inside a
//! document does not matter.
//!
//! # Architecture
//!
//! ```text
//! Document ──walk()──▶ Validator<'d> ──finish()──▶ ValidationReport
//!                          │
//!                          └── &'d Dictionary (shared, read-only)
//! ```

use crate::ast::{DataObject, Document, Entity, ItAsset, Process, Relationship, Report, RuleDef};
use crate::canon::canon;
use crate::config::ValidatorConfig;
use crate::dictionary::{Access, Dictionary};
use crate::rules::RuleId;
use crate::types::{Finding, ValidationReport};
use crate::walker::{walk, Visit};

use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;
use tracing::{debug, warn};

#[allow(clippy::expect_used)]
static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:-\s*)?([A-Za-z_][A-Za-z0-9_]*)\s+([A-Za-z][A-Za-z0-9_]*)\b")
        .expect("action pattern compiles")
});

/// Validates `doc` against `dictionary` and returns the findings.
#[must_use]
pub fn validate(dictionary: &Dictionary, config: ValidatorConfig, doc: &Document) -> ValidationReport {
    let mut validator = Validator::new(dictionary, config);
    walk(doc, &mut validator);
    validator.finish()
}

// ──── working state ────

#[derive(Debug, Default)]
struct ProcessFrame {
    declared: Vec<String>,
    used: HashSet<String>,
}

#[derive(Debug)]
struct EnumDomain {
    key: String,
    values: HashSet<String>,
    default: Option<String>,
}

/// Stateful checker for one syntax tree.
pub struct Validator<'d> {
    dictionary: &'d Dictionary,
    config: ValidatorConfig,
    disabled: BTreeSet<RuleId>,
    data_object_re: Option<Regex>,
    report: ValidationReport,
    data_objects: HashSet<String>,
    entities: HashSet<String>,
    it_assets: HashSet<String>,
    pending_refs: Vec<(String, String)>,
    pending_hosted: Vec<String>,
    enum_domains: Vec<EnumDomain>,
    enum_index: HashMap<String, usize>,
    process_stack: Vec<ProcessFrame>,
    finished: bool,
}

impl<'d> Validator<'d> {
    /// Creates a validator for one tree.
    #[must_use]
    pub fn new(dictionary: &'d Dictionary, config: ValidatorConfig) -> Self {
        let pattern = format!(
            r"\b({}[A-Za-z0-9_]+)\s*(Input|Output)?\b",
            regex::escape(&config.data_object_prefix)
        );
        let data_object_re = match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Data-object prefix unusable, permission checks disabled: {e}");
                None
            }
        };

        Self {
            dictionary,
            config,
            disabled: BTreeSet::new(),
            data_object_re,
            report: ValidationReport::new(),
            data_objects: HashSet::new(),
            entities: HashSet::new(),
            it_assets: HashSet::new(),
            pending_refs: Vec::new(),
            pending_hosted: Vec::new(),
            enum_domains: Vec::new(),
            enum_index: HashMap::new(),
            process_stack: Vec::new(),
            finished: false,
        }
    }

    /// Suppresses findings from the given rules.
    ///
    /// Disabling a rule never changes control flow: a malformed action still
    /// skips the remaining action checks.
    #[must_use]
    pub fn with_disabled(mut self, rules: impl IntoIterator<Item = RuleId>) -> Self {
        self.disabled.extend(rules);
        self
    }

    /// Returns the findings recorded so far.
    #[must_use]
    pub fn findings(&self) -> &ValidationReport {
        &self.report
    }

    /// Runs deferred checks if end-of-document was not visited, and returns
    /// the report.
    #[must_use]
    pub fn finish(mut self) -> ValidationReport {
        if !self.finished {
            self.resolve_deferred();
        }
        if !self.process_stack.is_empty() {
            debug!("{} process scope(s) left open", self.process_stack.len());
        }
        self.report
    }

    fn emit(&mut self, rule: RuleId, message: String) {
        self.push(rule, rule.finding(message));
    }

    fn emit_with_help(&mut self, rule: RuleId, message: String, help: String) {
        self.push(rule, rule.finding(message).with_suggestion(help));
    }

    fn push(&mut self, rule: RuleId, finding: Finding) {
        if self.disabled.contains(&rule) {
            return;
        }
        if rule.is_opt_in() && !self.config.dictionary_coverage {
            return;
        }
        self.report.push(finding);
    }

    fn resolve_deferred(&mut self) {
        self.finished = true;

        let dangling: Vec<(String, String)> = self
            .pending_refs
            .iter()
            .filter(|(_, data_ref)| !self.data_objects.contains(data_ref))
            .cloned()
            .collect();
        for (entity, data_ref) in dangling {
            self.emit_with_help(
                RuleId::MissingDataRef,
                format!("Entity '{entity}' references missing DataObject '{data_ref}'"),
                format!("Define DataObject '{data_ref}' or fix the dataRef of '{entity}'"),
            );
        }

        let bad_defaults: Vec<(String, String)> = self
            .enum_domains
            .iter()
            .filter_map(|d| {
                let default = d.default.as_ref()?;
                (!d.values.is_empty() && !d.values.contains(default))
                    .then(|| (default.clone(), d.key.clone()))
            })
            .collect();
        for (default, key) in bad_defaults {
            self.emit(
                RuleId::EnumDefaultOutsideValues,
                format!("Enum default '{default}' not in values for {key}"),
            );
        }

        let catalogs = &self.config.hosted_on_catalogs;
        if !catalogs.iter().any(|c| self.data_objects.contains(c)) {
            let message = |name: &str| {
                format!(
                    "Relationship '{name}': {} used but neither {} defined.",
                    self.config.hosted_on_type,
                    catalogs.join(" nor ")
                )
            };
            let unresolved: Vec<String> = self.pending_hosted.iter().map(|n| message(n)).collect();
            for message in unresolved {
                self.emit(RuleId::HostedOnWithoutCatalog, message);
            }
        }
    }

    fn record_enum_property(&mut self, key: String, values: HashSet<String>, default: Option<String>) {
        let index = match self.enum_index.get(&key) {
            Some(&i) => i,
            None => {
                self.enum_domains.push(EnumDomain {
                    key: key.clone(),
                    values: HashSet::new(),
                    default: None,
                });
                self.enum_index.insert(key, self.enum_domains.len() - 1);
                self.enum_domains.len() - 1
            }
        };
        let domain = &mut self.enum_domains[index];
        if !values.is_empty() {
            domain.values = values;
        }
        if default.is_some() {
            domain.default = default;
        }
    }

    fn check_free_text(&mut self, location: &str, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let hits: Vec<String> = self
            .dictionary
            .reserved_in(text)
            .map(|kw| kw.spelling().to_string())
            .collect();
        for keyword in hits {
            self.emit(
                RuleId::ReservedKeyword,
                format!(
                    "{location}: free-text contains reserved keyword '{keyword}'; consider quoting or using structured fields."
                ),
            );
        }
    }

    fn check_data_permissions(&mut self, line: &str, actor: &str, verb: &str) {
        let Some(re) = &self.data_object_re else {
            return;
        };
        let implied = self.dictionary.permission_for_verb(verb);
        let mut missing = Vec::new();
        for caps in re.captures_iter(line) {
            let data_object = &caps[1];
            let access = match caps.get(2).map(|m| m.as_str()) {
                Some("Input") => Some(Access::Write),
                Some("Output") => Some(Access::Read),
                _ => implied,
            };
            match access {
                Some(Access::Write) if !self.dictionary.can_write(actor, data_object) => {
                    missing.push((Access::Write, data_object.to_string()));
                }
                Some(Access::Read) if !self.dictionary.can_read(actor, data_object) => {
                    missing.push((Access::Read, data_object.to_string()));
                }
                _ => {}
            }
        }
        for (access, data_object) in missing {
            let mode = access.to_string();
            self.emit_with_help(
                RuleId::DataPermission,
                format!(
                    "Actor '{actor}' lacks {} permission on '{data_object}' (verb '{verb}').",
                    mode.to_ascii_uppercase()
                ),
                format!("Add {mode} permission for '{actor}' on '{data_object}' in actorDataPerms"),
            );
        }
    }

    fn is_known_endpoint(&self, name: &str) -> bool {
        self.entities.contains(name)
            || self.it_assets.contains(name)
            || self.dictionary.has_actor(name)
    }
}

impl Visit for Validator<'_> {
    fn data_object(&mut self, node: &DataObject) {
        debug!("DataObject {}", node.name);
        self.data_objects.insert(node.name.clone());
        if !self.dictionary.catalogues_data_object(&node.name) {
            self.emit(
                RuleId::DictionaryCoverage,
                format!("DataObject '{}' not found in dictionary.", node.name),
            );
        }

        for field in &node.fields {
            if let (Some(min), Some(max)) = (field.min, field.max) {
                if min > max {
                    self.emit(
                        RuleId::FieldBounds,
                        format!("DataObject: field '{}' has min>max ({min} > {max})", field.name),
                    );
                }
            }
            if canon(&field.field_type) == "enum" && field.values.is_none() {
                self.emit(
                    RuleId::EnumWithoutValues,
                    format!("DataObject: field '{}' Enum without values= list.", field.name),
                );
            }
        }
    }

    fn entity(&mut self, node: &Entity) {
        debug!("Entity {} -> {}", node.name, node.data_ref);
        self.entities.insert(node.name.clone());
        self.pending_refs
            .push((node.name.clone(), node.data_ref.clone()));
        if !self.dictionary.catalogues_entity(&node.name) {
            self.emit(
                RuleId::DictionaryCoverage,
                format!("Entity '{}' not found in dictionary.", node.name),
            );
        }

        for prop in &node.properties {
            if canon(&prop.prop_type) != "enum" {
                continue;
            }
            let values: HashSet<String> = prop
                .values
                .iter()
                .flatten()
                .map(|v| strip_chars(v, &['[', ']', '"', '\'']))
                .filter(|v| !v.is_empty())
                .collect();
            let default = prop
                .default
                .as_deref()
                .map(|d| strip_chars(d, &[':', '"', '\'']));
            self.record_enum_property(format!("{}.{}", node.name, prop.name), values, default);
        }
    }

    fn it_asset(&mut self, node: &ItAsset) {
        debug!("ITAsset {}", node.name);
        self.it_assets.insert(node.name.clone());
    }

    fn relationship(&mut self, node: &Relationship) {
        debug!("Relationship {}", node.name);
        if self.config.warn_unknown_assets {
            for (side, endpoint) in [("From", &node.from), ("To", &node.to)] {
                if !self.is_known_endpoint(endpoint) {
                    self.emit(
                        RuleId::UnknownRelationshipEndpoint,
                        format!(
                            "Relationship '{}': {side}='{endpoint}' not a known Entity/ITAsset/Actor.",
                            node.name
                        ),
                    );
                }
            }
        }

        if !self.dictionary.is_relationship_type(&node.rel_type) {
            let known = self.dictionary.relationship_types();
            let help = if known.is_empty() {
                format!("Add '{}' to relationshipTypes in the dictionary", node.rel_type)
            } else {
                format!("Valid types: {}", known.join(", "))
            };
            self.emit_with_help(
                RuleId::UnknownRelationshipType,
                format!(
                    "Relationship '{}': Type '{}' is not allowed.",
                    node.name, node.rel_type
                ),
                help,
            );
        }

        // the catalogue may be declared anywhere in the document
        if canon(&node.rel_type) == canon(&self.config.hosted_on_type)
            && !self.config.hosted_on_catalogs.is_empty()
        {
            self.pending_hosted.push(node.name.clone());
        }
    }

    fn enter_process(&mut self, node: &Process) {
        let mut frame = ProcessFrame::default();
        for raw in &node.actors {
            let actor: String = raw
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            if !actor.is_empty() && !frame.declared.contains(&actor) {
                frame.declared.push(actor);
            }
        }
        debug!("Enter process {} ({} actors)", node.name, frame.declared.len());

        if self.dictionary.has_actor_catalogue() {
            let unknown: Vec<String> = frame
                .declared
                .iter()
                .filter(|a| !self.dictionary.has_actor(a))
                .cloned()
                .collect();
            for actor in unknown {
                self.emit(
                    RuleId::DictionaryCoverage,
                    format!("Process: actor '{actor}' not found in dictionary."),
                );
            }
        }

        self.process_stack.push(frame);
    }

    fn exit_process(&mut self, node: &Process) {
        let Some(frame) = self.process_stack.pop() else {
            debug!("Unbalanced exit for process {}, ignored", node.name);
            return;
        };
        for actor in frame.declared {
            if !frame.used.contains(&actor) {
                self.emit(
                    RuleId::UnusedProcessActor,
                    format!("Process: actor '{actor}' declared but never used in Actions."),
                );
            }
        }
    }

    fn action(&mut self, line: &str) {
        let Some(caps) = ACTION_RE.captures(line) else {
            self.emit_with_help(
                RuleId::ActionShape,
                "Action missing explicit 'Actor Verb' prefix; use '- <Actor> <Verb> ...'"
                    .to_string(),
                format!("Rewrite as '- <Actor> <Verb> {}'", line.trim().trim_start_matches('-').trim()),
            );
            return;
        };
        let actor = &caps[1];
        let verb = &caps[2];

        if let Some(frame) = self.process_stack.last_mut() {
            frame.used.insert(actor.to_string());
        }

        let dictionary = self.dictionary;
        if !dictionary.has_actor(actor) {
            self.emit(
                RuleId::UnknownActor,
                format!("Action actor '{actor}' not in dictionary."),
            );
        }
        if !dictionary.has_verb(verb) {
            self.emit(
                RuleId::UnknownVerb,
                format!("Verb '{verb}' not in domain verb list."),
            );
        }
        if !dictionary.verb_permitted_by_any(verb) {
            self.emit(
                RuleId::VerbNeverPermitted,
                format!("Verb '{verb}' is never permitted by any actor in the domain whitelist."),
            );
        }
        if !dictionary.actor_allows(actor, verb) {
            self.emit_with_help(
                RuleId::ActorVerbNotAllowed,
                format!("Actor '{actor}' not allowed to perform '{verb}'."),
                format!("Add '{verb}' to actor '{actor}' permissions in dictionary"),
            );
        }

        self.check_data_permissions(line, actor, verb);
    }

    fn validation(&mut self, line: &str) {
        let text = line.trim_start();
        let text = text.strip_prefix('-').unwrap_or(text);
        self.check_free_text("Validation", text);
    }

    fn rule(&mut self, node: &RuleDef) {
        debug!("Rule {}", node.name);
        self.check_free_text("Rule.Description", &node.description);
        self.check_free_text("Rule.Trigger", &node.trigger);
    }

    fn report(&mut self, node: &Report) {
        debug!("Report {}", node.name);
        self.check_free_text("Report.Query", &node.query);
    }

    fn end_document(&mut self) {
        if self.finished {
            return;
        }
        self.resolve_deferred();
    }
}

fn strip_chars(s: &str, drop: &[char]) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !drop.contains(c))
        .collect()
}
