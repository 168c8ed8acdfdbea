//! Key-path flattening.
//!
//! Converts a nested document into a single-level, ordered mapping from
//! rendered key paths to scalars:
//!
//! - object members contribute their own name as a segment;
//! - a single-element array is unwrapped and contributes no segment;
//! - a multi-element array contributes one zero-padded positional segment
//!   per element.
//!
//! The unwrap rule is what lets one-element wrapper lists and checkbox
//! option lists share a schema shape. Two leaves rendering to the same key
//! is fatal ([`FormError::DuplicateKey`]); nothing is overwritten.
//!
//! Traversal uses an explicit stack, so nesting depth is bounded by heap,
//! not by the call stack.

use crate::error::FormError;
use crate::path::{FlattenOptions, KeyPath, Segment};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One scalar leaf with both its structured and rendered address.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry {
    pub path: KeyPath,
    pub key: String,
    pub value: Value,
}

/// A flattened document in traversal order.
#[derive(Debug, Clone, Default)]
pub struct FlatDocument {
    options: FlattenOptions,
    entries: Vec<FlatEntry>,
    index: HashMap<String, usize>,
}

impl FlatDocument {
    fn new(options: FlattenOptions) -> Self {
        Self {
            options,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn insert(&mut self, path: KeyPath, value: Value) -> Result<(), FormError> {
        let key = path.render(&self.options);
        if self.index.contains_key(&key) {
            return Err(FormError::DuplicateKey { key });
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(FlatEntry { path, key, value });
        Ok(())
    }

    pub fn options(&self) -> &FlattenOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entry(key).map(|entry| &entry.value)
    }

    pub fn entry(&self, key: &str) -> Option<&FlatEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlatEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Render a structured path with this document's options.
    pub fn render(&self, path: &KeyPath) -> String {
        path.render(&self.options)
    }

    /// The mapping as a JSON object, preserving traversal order.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for entry in &self.entries {
            map.insert(entry.key.clone(), entry.value.clone());
        }
        Value::Object(map)
    }
}

impl Serialize for FlatDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a FlatDocument {
    type Item = &'a FlatEntry;
    type IntoIter = std::slice::Iter<'a, FlatEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Flatten with the default `.` separator and 4-digit indices.
pub fn flatten(document: &Value) -> Result<FlatDocument, FormError> {
    flatten_with(document, &FlattenOptions::default())
}

pub fn flatten_with(document: &Value, options: &FlattenOptions) -> Result<FlatDocument, FormError> {
    let mut flat = FlatDocument::new(options.clone());
    let mut stack: Vec<(KeyPath, &Value)> = vec![(KeyPath::root(), document)];

    while let Some((path, node)) = stack.pop() {
        match node {
            Value::Object(members) => {
                // Reverse push keeps pop order equal to member order.
                for (name, child) in members.iter().rev() {
                    stack.push((path.child(Segment::Key(name.clone())), child));
                }
            }
            Value::Array(items) if items.len() == 1 => {
                stack.push((path, &items[0]));
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate().rev() {
                    stack.push((path.child(Segment::Index(i)), child));
                }
            }
            scalar => flat.insert(path, scalar.clone())?,
        }
    }

    Ok(flat)
}
