//! Schema walking.
//!
//! A schema is a tree of section and question nodes. Question nodes carry
//! fixed attribute members (`name`, `label`, `type`, `isRequired`,
//! `group`, `children`, help-text urls). The walker flattens the schema and
//! regroups the attributes that sit on the same node:
//!
//! ```text
//! s.0000.name       = "Section0-0"      ┐
//! s.0000.label      = "Title"           ├─ {name, label, isRequired}
//! s.0000.isRequired = "true"            ┘
//! s.0001.name       = "Section0-1"      ── {name}
//! ```
//!
//! Siblings are found by exact structural equality of the parent path,
//! not by substring tests on rendered keys, so an attribute name that is a
//! substring of another (`label` / `labelHelp`) never pairs by accident.

use crate::error::FormError;
use crate::flatten::flatten;
use crate::path::{FlattenOptions, KeyPath};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const ATTR_NAME: &str = "name";
pub const ATTR_LABEL: &str = "label";
pub const ATTR_GROUP: &str = "group";
pub const ATTR_TYPE: &str = "type";
pub const ATTR_IS_REQUIRED: &str = "isRequired";
pub const ATTR_CHILDREN: &str = "children";

const ROOT_NODE: &str = "<root>";

/// The requested attributes found on one schema node.
///
/// Serializes as the bare attribute mapping, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeGroup {
    node: KeyPath,
    values: Map<String, Value>,
}

impl AttributeGroup {
    /// Path of the schema node the attributes sit on.
    pub fn node(&self) -> &KeyPath {
        &self.node
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.values.get(attribute)
    }

    /// String-valued attribute; non-string values read as absent.
    pub fn get_str(&self, attribute: &str) -> Option<&str> {
        self.values.get(attribute).and_then(Value::as_str)
    }

    /// String-valued attribute that the caller cannot do without.
    pub fn require_str(&self, attribute: &str) -> Result<&str, FormError> {
        self.get_str(attribute)
            .ok_or_else(|| FormError::MissingAttribute {
                path: self.describe_node(),
                attribute: attribute.to_string(),
            })
    }

    /// The node path for messages; the document root reads as `<root>`.
    fn describe_node(&self) -> String {
        if self.node.is_root() {
            ROOT_NODE.to_string()
        } else {
            self.node.render(&FlattenOptions::default())
        }
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str(ATTR_NAME)
    }

    pub fn label(&self) -> Option<&str> {
        self.get_str(ATTR_LABEL)
    }

    pub fn group(&self) -> Option<&str> {
        self.get_str(ATTR_GROUP)
    }
}

impl Serialize for AttributeGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

/// One group per schema node that defines `primary`, holding whichever of
/// `attributes` that node also defines.
///
/// `primary` only selects nodes; include it in `attributes` to have its
/// value reported. Nodes with none of the requested siblings yield an
/// empty group.
pub fn extract_grouped_attributes(
    schema: &Value,
    primary: &str,
    attributes: &[&str],
) -> Result<Vec<AttributeGroup>, FormError> {
    let flat = flatten(schema)?;

    let mut by_path: HashMap<&KeyPath, &Value> = HashMap::new();
    for entry in &flat {
        if let Some(last) = entry.path.last_key()
            && attributes.contains(&last)
        {
            by_path.insert(&entry.path, &entry.value);
        }
    }

    let mut groups = Vec::new();
    for entry in &flat {
        if entry.path.last_key() != Some(primary) {
            continue;
        }
        let mut values = Map::new();
        for attribute in attributes {
            let sibling = entry.path.sibling(attribute);
            if let Some(value) = by_path.get(&sibling) {
                values.insert((*attribute).to_string(), (*value).clone());
            }
        }
        groups.push(AttributeGroup {
            node: entry.path.parent(),
            values,
        });
    }

    Ok(groups)
}

/// `{name, label}` for every named node.
pub fn name_label_pairs(schema: &Value) -> Result<Vec<AttributeGroup>, FormError> {
    extract_grouped_attributes(schema, ATTR_NAME, &[ATTR_NAME, ATTR_LABEL])
}

/// `{name, label, group}` for every named node; checkbox options carry
/// the owning question's name in `group`.
pub fn name_label_group_triples(schema: &Value) -> Result<Vec<AttributeGroup>, FormError> {
    extract_grouped_attributes(schema, ATTR_NAME, &[ATTR_NAME, ATTR_LABEL, ATTR_GROUP])
}

/// Every non-empty question label, in schema order.
pub fn schema_questions(schema: &Value) -> Result<Vec<String>, FormError> {
    Ok(name_label_pairs(schema)?
        .iter()
        .filter_map(AttributeGroup::label)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect())
}

/// The first node, depth-first, whose `label` equals `label`, returned
/// whole with any nested questions.
pub fn search_label<'a>(schema: &'a Value, label: &str) -> Option<&'a Value> {
    let mut stack = vec![schema];
    while let Some(node) = stack.pop() {
        match node {
            Value::Object(members) => {
                if members.get(ATTR_LABEL).and_then(Value::as_str) == Some(label) {
                    return Some(node);
                }
                stack.extend(members.values().rev());
            }
            Value::Array(items) => stack.extend(items.iter().rev()),
            _ => {}
        }
    }
    None
}
