//! Key search and removal over unconstrained documents.
//!
//! Traversal visits object members in order, descending into member
//! objects and into array elements that are themselves objects. Arrays
//! nested directly inside arrays are not entered.
//!
//! `remove_key` stops after the first removal anywhere in the tree;
//! `remove_keys` is exhaustive.

use serde_json::{Map, Value};

/// Depth-first value of the first member named `key`.
pub fn find_value<'a>(document: &'a Value, key: &str) -> Option<&'a Value> {
    match document {
        Value::Object(map) => find_in_map(map, key),
        Value::Array(items) => find_in_items(items, key),
        _ => None,
    }
}

fn find_in_map<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    for (name, value) in map {
        if name == key {
            return Some(value);
        }
        let found = match value {
            Value::Object(inner) => find_in_map(inner, key),
            Value::Array(items) => find_in_items(items, key),
            _ => None,
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

fn find_in_items<'a>(items: &'a [Value], key: &str) -> Option<&'a Value> {
    items.iter().find_map(|item| match item {
        Value::Object(inner) => find_in_map(inner, key),
        _ => None,
    })
}

/// Whether any member named `key` exists.
pub fn contains_key(document: &Value, key: &str) -> bool {
    find_value(document, key).is_some()
}

/// Remove the first member named `key` (depth-first) and return the
/// document.
pub fn remove_key(mut document: Value, key: &str) -> Value {
    remove_first(&mut document, key);
    document
}

/// In-place form of [`remove_key`]; reports whether a member was removed.
pub fn remove_first(document: &mut Value, key: &str) -> bool {
    match document {
        Value::Object(map) => remove_first_in_map(map, key),
        Value::Array(items) => remove_first_in_items(items, key),
        _ => false,
    }
}

fn remove_first_in_map(map: &mut Map<String, Value>, key: &str) -> bool {
    let mut found_here = false;
    for (name, value) in map.iter_mut() {
        if name == key {
            found_here = true;
            break;
        }
        let removed = match value {
            Value::Object(inner) => remove_first_in_map(inner, key),
            Value::Array(items) => remove_first_in_items(items, key),
            _ => false,
        };
        if removed {
            return true;
        }
    }
    if found_here {
        map.shift_remove(key);
    }
    found_here
}

fn remove_first_in_items(items: &mut [Value], key: &str) -> bool {
    items.iter_mut().any(|item| match item {
        Value::Object(inner) => remove_first_in_map(inner, key),
        _ => false,
    })
}

/// Remove every member whose name is in `keys`, at every level, and
/// return the document. Removed members are not searched further.
pub fn remove_keys<S: AsRef<str>>(mut document: Value, keys: &[S]) -> Value {
    remove_all(&mut document, keys);
    document
}

/// In-place form of [`remove_keys`]; returns how many members were removed.
pub fn remove_all<S: AsRef<str>>(document: &mut Value, keys: &[S]) -> usize {
    match document {
        Value::Object(map) => remove_all_in_map(map, keys),
        Value::Array(items) => remove_all_in_items(items, keys),
        _ => 0,
    }
}

fn remove_all_in_map<S: AsRef<str>>(map: &mut Map<String, Value>, keys: &[S]) -> usize {
    let before = map.len();
    map.retain(|name, _| !keys.iter().any(|key| key.as_ref() == name));
    let mut removed = before - map.len();
    for value in map.values_mut() {
        removed += match value {
            Value::Object(inner) => remove_all_in_map(inner, keys),
            Value::Array(items) => remove_all_in_items(items, keys),
            _ => 0,
        };
    }
    removed
}

fn remove_all_in_items<S: AsRef<str>>(items: &mut [Value], keys: &[S]) -> usize {
    items
        .iter_mut()
        .map(|item| match item {
            Value::Object(inner) => remove_all_in_map(inner, keys),
            _ => 0,
        })
        .sum()
}
