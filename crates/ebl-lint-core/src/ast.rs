//! Syntax tree model for EBL definitions.
//!
//! The tree is produced by an external grammar-conformant parser and handed
//! over as JSON. Node kinds are a closed set of tagged variants; only the
//! attributes the validator queries are modelled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Errors from loading a syntax tree document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The tree file could not be read.
    #[error("Failed to read syntax tree {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The tree is not valid JSON or does not match the node schema.
    #[error("Syntax tree JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Root of an EBL definition (`eblDefinition`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Original EBL source text, when the parser kept it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Top-level declarations in document order.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Document {
    /// Loads a document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|e| DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the node schema.
    pub fn from_json(content: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Returns the text heuristics should scan: the EBL source when
    /// present, otherwise a rendering of the tree.
    #[must_use]
    pub fn text(&self) -> String {
        self.source.clone().unwrap_or_else(|| self.to_string())
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Item {
    /// `DataObject <name> { Schema: ... }`
    DataObject(DataObject),
    /// `Entity <name> { dataRef: ... }`
    Entity(Entity),
    /// `ITAsset <name> { ... }`
    ItAsset(ItAsset),
    /// `Relationship <name> { From/To/Type }`
    Relationship(Relationship),
    /// `Process <name> { Actors: [...] ... }`
    Process(Process),
    /// `Rule <name> { Description/Trigger }`
    Rule(RuleDef),
    /// `Report <name> { Query }`
    Report(Report),
}

/// A data object with its schema fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataObject {
    /// Declared name.
    pub name: String,
    /// Schema fields.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// One schema field of a data object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Declared type (`String`, `Decimal`, `Enum`, ...).
    #[serde(rename = "type")]
    pub field_type: String,
    /// `min=` bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// `max=` bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// `values=[...]` list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// Remaining attributes verbatim (`required`, `encrypted`, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<String>,
}

/// An entity referencing one data object as its schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Declared name.
    pub name: String,
    /// Name of the data object backing this entity.
    pub data_ref: String,
    /// Declared properties.
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// One entity property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub prop_type: String,
    /// `values: [...]` list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// `default: X`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// An IT asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItAsset {
    /// Declared name.
    pub name: String,
}

/// A typed relationship between two entities, assets or actors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Declared name.
    pub name: String,
    /// `From:` endpoint.
    pub from: String,
    /// `To:` endpoint.
    pub to: String,
    /// `Type:` value.
    #[serde(rename = "type")]
    pub rel_type: String,
}

/// A process scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// Declared name.
    pub name: String,
    /// `Actors: [...]` header, as written.
    #[serde(default)]
    pub actors: Vec<String>,
    /// Steps in order.
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Actions declared directly on the process.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    /// Nested process blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processes: Vec<Process>,
}

/// One step of a process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Step name.
    pub name: String,
    /// `Input:` items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<String>,
    /// `Validation:` lines (free text).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<String>,
    /// `Action:` lines, `- <Actor> <Verb> ...`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    /// `OnError:` lines.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_error: Vec<String>,
    /// `Output:` items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<String>,
}

/// A business rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDef {
    /// Declared name.
    pub name: String,
    /// `Description:` free text.
    #[serde(default)]
    pub description: String,
    /// `Trigger:` free text.
    #[serde(default)]
    pub trigger: String,
}

/// A report definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Declared name.
    pub name: String,
    /// `Query:` free text.
    #[serde(default)]
    pub query: String,
}

const INDENT: &str = "    ";

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataObject(d) => {
                writeln!(f, "DataObject {} {{", d.name)?;
                writeln!(f, "{INDENT}Schema:")?;
                for field in &d.fields {
                    writeln!(f, "{INDENT}{INDENT}{field}")?;
                }
                writeln!(f, "}}")
            }
            Self::Entity(e) => {
                writeln!(f, "Entity {} {{", e.name)?;
                writeln!(f, "{INDENT}dataRef: {}", e.data_ref)?;
                if !e.properties.is_empty() {
                    writeln!(f, "{INDENT}Properties:")?;
                    for prop in &e.properties {
                        writeln!(f, "{INDENT}{INDENT}{prop}")?;
                    }
                }
                writeln!(f, "}}")
            }
            Self::ItAsset(a) => writeln!(f, "ITAsset {} {{ }}", a.name),
            Self::Relationship(r) => {
                writeln!(f, "Relationship {} {{", r.name)?;
                writeln!(f, "{INDENT}From: {}", r.from)?;
                writeln!(f, "{INDENT}To: {}", r.to)?;
                writeln!(f, "{INDENT}Type: {}", r.rel_type)?;
                writeln!(f, "}}")
            }
            Self::Process(p) => write_process(f, p, 0),
            Self::Rule(r) => {
                writeln!(f, "Rule {} {{", r.name)?;
                writeln!(f, "{INDENT}Description: \"{}\"", r.description)?;
                writeln!(f, "{INDENT}Trigger: {}", r.trigger)?;
                writeln!(f, "}}")
            }
            Self::Report(r) => {
                writeln!(f, "Report {} {{", r.name)?;
                writeln!(f, "{INDENT}Query: {}", r.query)?;
                writeln!(f, "}}")
            }
        }
    }
}

impl fmt::Display for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.field_type)?;
        let mut attrs = Vec::new();
        if let Some(min) = self.min {
            attrs.push(format!("min={min}"));
        }
        if let Some(max) = self.max {
            attrs.push(format!("max={max}"));
        }
        if let Some(values) = &self.values {
            attrs.push(format!("values=[{}]", values.join(", ")));
        }
        attrs.extend(self.attrs.iter().cloned());
        if !attrs.is_empty() {
            write!(f, " ({})", attrs.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.prop_type)?;
        let mut attrs = Vec::new();
        if let Some(values) = &self.values {
            attrs.push(format!("values: [{}]", values.join(", ")));
        }
        if let Some(default) = &self.default {
            attrs.push(format!("default: {default}"));
        }
        if !attrs.is_empty() {
            write!(f, " ({})", attrs.join(", "))?;
        }
        Ok(())
    }
}

fn write_process(f: &mut fmt::Formatter<'_>, p: &Process, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);
    writeln!(f, "{pad}Process {} {{", p.name)?;
    writeln!(f, "{pad}{INDENT}Actors: [{}]", p.actors.join(", "))?;
    for step in &p.steps {
        writeln!(f, "{pad}{INDENT}Step {} {{", step.name)?;
        let inner = format!("{pad}{INDENT}{INDENT}");
        write_list(f, &inner, "Input", &step.inputs)?;
        write_list(f, &inner, "Validation", &step.validations)?;
        write_list(f, &inner, "Action", &step.actions)?;
        write_list(f, &inner, "OnError", &step.on_error)?;
        write_list(f, &inner, "Output", &step.outputs)?;
        writeln!(f, "{pad}{INDENT}}}")?;
    }
    write_list(f, &format!("{pad}{INDENT}"), "Action", &p.actions)?;
    for nested in &p.processes {
        write_process(f, nested, depth + 1)?;
    }
    writeln!(f, "{pad}}}")
}

fn write_list(f: &mut fmt::Formatter<'_>, pad: &str, label: &str, lines: &[String]) -> fmt::Result {
    if lines.is_empty() {
        return Ok(());
    }
    writeln!(f, "{pad}{label}:")?;
    for line in lines {
        let line = line.trim();
        if line.starts_with('-') {
            writeln!(f, "{pad}{INDENT}{line}")?;
        } else {
            writeln!(f, "{pad}{INDENT}- {line}")?;
        }
    }
    Ok(())
}
