//! Differences between two answer snapshots.
//!
//! The comparison is "changed from something": a key is reported only
//! when it exists in both snapshots, the previous value is non-empty
//! (not `null`, `false`, zero, or empty), and the values differ. Keys new
//! in the current snapshot are not reported.
//! After labelling, changes whose path resolves to no schema label are
//! dropped.

use crate::error::FormError;
use crate::flatten::flatten;
use crate::matcher::MatchRule;
use crate::path::{FlattenOptions, KeyPath};
use crate::schema::name_label_pairs;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A changed answer before label resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RawChange {
    pub path: KeyPath,
    pub key: String,
    pub current: Value,
    pub previous: Value,
}

/// A changed answer attached to its question label.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub key: String,
    pub label: String,
    pub current: Value,
    pub previous: Value,
}

/// Labelled changes in current-snapshot order.
///
/// Serializes as `{key: {label: [current, previous]}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentDiff {
    pub changes: Vec<Change>,
}

impl DocumentDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn get(&self, key: &str) -> Option<&Change> {
        self.changes.iter().find(|change| change.key == key)
    }
}

struct LabelledPair<'a>(&'a Change);

impl Serialize for LabelledPair<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.0.label, &[&self.0.current, &self.0.previous])?;
        map.end()
    }
}

impl Serialize for DocumentDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.changes.len()))?;
        for change in &self.changes {
            map.serialize_entry(&change.key, &LabelledPair(change))?;
        }
        map.end()
    }
}

/// Previous values that count as "nothing": `null`, `false`, zero, and
/// empty strings or containers.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.is_empty(),
    }
}

/// Keys present in both snapshots whose non-empty previous value differs
/// from the current one.
pub fn changed_values(current: &Value, previous: &Value) -> Result<Vec<RawChange>, FormError> {
    let current = flatten(current)?;
    let previous = flatten(previous)?;

    let mut changes = Vec::new();
    for entry in &current {
        let Some(before) = previous.get(&entry.key) else {
            continue;
        };
        if is_empty_value(before) || *before == entry.value {
            continue;
        }
        changes.push(RawChange {
            path: entry.path.clone(),
            key: entry.key.clone(),
            current: entry.value.clone(),
            previous: before.clone(),
        });
    }
    Ok(changes)
}

/// Changed answers labelled from `schema`.
///
/// A change takes the label of the first `{name, label}` group whose name
/// is contained in the final segment of the change's path.
pub fn diff(current: &Value, previous: &Value, schema: &Value) -> Result<DocumentDiff, FormError> {
    let raw = changed_values(current, previous)?;
    let groups = name_label_pairs(schema)?;
    let options = FlattenOptions::default();

    let mut changes = Vec::new();
    for change in raw {
        let section = change
            .path
            .last()
            .map(|segment| segment.render(&options))
            .unwrap_or_default();
        let label = groups.iter().find_map(|group| {
            let name = group.name().filter(|name| !name.is_empty())?;
            let label = group.label()?;
            MatchRule::Contains.matches(&section, name).then_some(label)
        });
        match label {
            Some(label) => changes.push(Change {
                key: change.key,
                label: label.to_string(),
                current: change.current,
                previous: change.previous,
            }),
            None => tracing::debug!(key = %change.key, "dropping change without schema label"),
        }
    }

    Ok(DocumentDiff { changes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_pairs(changes: &[RawChange]) -> Value {
        let mut map = serde_json::Map::new();
        for change in changes {
            map.insert(
                change.key.clone(),
                json!([change.current.clone(), change.previous.clone()]),
            );
        }
        Value::Object(map)
    }

    #[test]
    fn reports_changed_value() {
        let changes = changed_values(&json!({"x": "A"}), &json!({"x": "B"})).unwrap();
        assert_eq!(raw_pairs(&changes), json!({"x": ["A", "B"]}));
    }

    #[test]
    fn new_keys_are_not_reported() {
        let changes = changed_values(&json!({"x": "A"}), &json!({})).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn empty_previous_is_not_reported() {
        let changes = changed_values(&json!({"x": "A", "y": "B"}), &json!({"x": "", "y": null}))
            .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn false_previous_is_not_reported() {
        let changes = changed_values(&json!({"x": true}), &json!({"x": false})).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn zero_previous_is_not_reported() {
        let changes = changed_values(&json!({"y": 5, "z": 2.5}), &json!({"y": 0, "z": 0.0})).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn truthy_scalar_previous_is_reported() {
        let changes = changed_values(&json!({"x": false, "y": 0}), &json!({"x": true, "y": 5})).unwrap();
        assert_eq!(raw_pairs(&changes), json!({"x": [false, true], "y": [0, 5]}));
    }

    #[test]
    fn empty_containers_count_as_empty() {
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
        assert!(!is_empty_value(&json!([0])));
        assert!(!is_empty_value(&json!(" ")));
        assert!(!is_empty_value(&json!(-1)));
    }

    #[test]
    fn unchanged_values_are_not_reported() {
        let changes = changed_values(&json!({"x": 1, "y": true}), &json!({"x": 1, "y": true}))
            .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn labels_attach_and_unlabelled_drop() {
        let schema = json!([
            {"name": "Section0-0", "label": "Title"},
            {"name": "Section0-1", "label": "Purpose"}
        ]);
        let current = json!([{"summary": [{"Section0-0": "dd 44", "Section0-1": "ee 44", "internal": "2"}]}]);
        let previous = json!([{"summary": [{"Section0-0": "dd 3", "Section0-1": "ee 44", "internal": "1"}]}]);

        let result = diff(&current, &previous, &schema).unwrap();
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"summary.Section0-0": {"Title": ["dd 44", "dd 3"]}})
        );
        assert_eq!(result.get("summary.Section0-0").map(|c| c.label.as_str()), Some("Title"));
    }
}
