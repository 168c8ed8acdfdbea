//! Value and key-path searches over flattened answers.

use crate::error::FormError;
use crate::flatten::flatten;
use crate::scalar::scalar_text;
use serde::Serialize;
use serde_json::Value;

/// A flattened answer that matched a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueHit {
    pub key: String,
    pub value: Value,
}

/// Entries whose scalar text equals one of `terms`, ignoring case.
pub fn search_values<S: AsRef<str>>(document: &Value, terms: &[S]) -> Result<Vec<ValueHit>, FormError> {
    let terms: Vec<String> = terms.iter().map(|t| t.as_ref().to_lowercase()).collect();
    let flat = flatten(document)?;
    Ok(flat
        .iter()
        .filter(|entry| {
            let text = scalar_text(&entry.value).to_lowercase();
            terms.iter().any(|term| *term == text)
        })
        .map(|entry| ValueHit {
            key: entry.key.clone(),
            value: entry.value.clone(),
        })
        .collect())
}

/// Entries whose rendered key equals one of `paths`, ignoring case.
pub fn search_paths<S: AsRef<str>>(document: &Value, paths: &[S]) -> Result<Vec<ValueHit>, FormError> {
    let flat = flatten(document)?;
    Ok(flat
        .iter()
        .filter(|entry| {
            paths
                .iter()
                .any(|path| path.as_ref().eq_ignore_ascii_case(&entry.key))
        })
        .map(|entry| ValueHit {
            key: entry.key.clone(),
            value: entry.value.clone(),
        })
        .collect())
}

/// Value of the first entry whose final segment equals one of `names`,
/// ignoring case.
pub fn search_answer<S: AsRef<str>>(document: &Value, names: &[S]) -> Result<Option<Value>, FormError> {
    let flat = flatten(document)?;
    let hit = flat.iter().find(|entry| {
        let last = entry
            .path
            .last()
            .map(|segment| segment.render(flat.options()))
            .unwrap_or_default();
        names
            .iter()
            .any(|name| name.as_ref().to_lowercase() == last.to_lowercase())
    });
    Ok(hit.map(|entry| entry.value.clone()))
}
