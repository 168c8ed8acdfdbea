//! Cross-referencing data key paths against schema attribute groups.
//!
//! Data and schema trees do not share structural prefixes (list indices
//! differ between an answer document and its schema), so joins are done
//! on names with an explicit [`MatchRule`] per call site.

use crate::flatten::FlatDocument;
use crate::scalar::scalar_text;
use crate::schema::AttributeGroup;
use serde::Serialize;
use serde_json::Value;

/// Literal token a checkbox option's stored value contains when ticked.
pub const CHECKBOX_SELECTED_TOKEN: &str = "on";

/// How a candidate string is compared against a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Candidate equals pattern.
    Exact,
    /// Candidate ends with pattern.
    EndsWith,
    /// Pattern occurs somewhere inside candidate.
    Contains,
    /// Pattern occurs inside candidate, ignoring case.
    ContainsIgnoreCase,
}

impl MatchRule {
    pub fn matches(self, candidate: &str, pattern: &str) -> bool {
        match self {
            Self::Exact => candidate == pattern,
            Self::EndsWith => candidate.ends_with(pattern),
            Self::Contains => candidate.contains(pattern),
            Self::ContainsIgnoreCase => candidate.to_lowercase().contains(&pattern.to_lowercase()),
        }
    }
}

/// Whether a stored checkbox value marks the option as ticked.
pub fn is_checked(value: &Value) -> bool {
    MatchRule::Contains.matches(&scalar_text(value), CHECKBOX_SELECTED_TOKEN)
}

/// The label of the first group whose `name` ends `data_path`.
///
/// Groups without a label are passed over. Unlabelled paths are normal:
/// internal answers need not appear in the schema.
pub fn label_for_path<'a>(groups: &'a [AttributeGroup], data_path: &str) -> Option<&'a str> {
    groups.iter().find_map(|group| {
        let name = group.name()?;
        let label = group.label()?;
        MatchRule::EndsWith.matches(data_path, name).then_some(label)
    })
}

/// A ticked checkbox option resolved to its schema label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedOption {
    pub name: String,
    pub label: String,
    pub key: String,
    pub value: Value,
}

/// The options of checkbox `question_name` that are ticked in `data`.
///
/// Options are the groups whose `group` equals the question's name; an
/// option is selected when a data key ends with the option's name and its
/// value contains [`CHECKBOX_SELECTED_TOKEN`].
pub fn checkbox_selections(
    groups: &[AttributeGroup],
    question_name: &str,
    data: &FlatDocument,
) -> Vec<SelectedOption> {
    let mut selected = Vec::new();
    for option in groups {
        if option.group() != Some(question_name) {
            continue;
        }
        let (Some(name), Some(label)) = (option.name(), option.label()) else {
            continue;
        };
        let hit = data
            .iter()
            .find(|entry| MatchRule::EndsWith.matches(&entry.key, name) && is_checked(&entry.value));
        if let Some(entry) = hit {
            selected.push(SelectedOption {
                name: name.to_string(),
                label: label.to_string(),
                key: entry.key.clone(),
                value: entry.value.clone(),
            });
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::schema::{name_label_group_triples, name_label_pairs};
    use serde_json::json;

    fn schema() -> Value {
        json!([
            {"name": "Section0-0", "label": "Title", "type": "text"},
            {
                "name": "Section1-0",
                "label": "Tenure",
                "type": "checkbox",
                "children": [
                    {"name": "Section1-0-0", "label": "Freehold", "group": "Section1-0"},
                    {"name": "Section1-0-1", "label": "Leasehold", "group": "Section1-0"},
                    {"name": "Section1-0-2", "label": "Crown", "group": "Section1-0"}
                ]
            }
        ])
    }

    #[test]
    fn rules_are_distinct() {
        assert!(MatchRule::Exact.matches("abc", "abc"));
        assert!(!MatchRule::Exact.matches("xabc", "abc"));
        assert!(MatchRule::EndsWith.matches("s.0001.abc", "abc"));
        assert!(!MatchRule::EndsWith.matches("abc.0001", "abc"));
        assert!(MatchRule::Contains.matches("xabcx", "abc"));
        assert!(!MatchRule::Contains.matches("xABCx", "abc"));
        assert!(MatchRule::ContainsIgnoreCase.matches("xABCx", "abc"));
    }

    #[test]
    fn label_by_suffix() {
        let groups = name_label_pairs(&schema()).unwrap();
        assert_eq!(
            label_for_path(&groups, "summary.0003.Section0-0"),
            Some("Title")
        );
        assert_eq!(label_for_path(&groups, "internal.flag"), None);
    }

    #[test]
    fn checkbox_options_need_on_token() {
        let groups = name_label_group_triples(&schema()).unwrap();
        let data = flatten(&json!({
            "tenure": [{
                "Section1-0-0": "on",
                "Section1-0-1": "",
                "Section1-0-2": "off"
            }]
        }))
        .unwrap();

        let selected = checkbox_selections(&groups, "Section1-0", &data);
        let labels: Vec<&str> = selected.iter().map(|s| s.label.as_str()).collect();
        // "off" does not contain the token.
        assert_eq!(labels, vec!["Freehold"]);
        assert_eq!(selected[0].key, "tenure.Section1-0-0");
    }
}
