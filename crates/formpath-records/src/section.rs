//! Structured section + question search.
//!
//! Given a section label, a question, and the answer a user is looking
//! for, resolve the candidate answer names from the schema and scan a
//! proposal's answers for matches:
//!
//! - free-text and choice questions match the question's own name, and
//!   the stored value must contain the answer text (case-insensitive);
//! - checkbox questions match the option whose `group` is the question's
//!   name and whose label is the answer, and the stored value must carry
//!   the ticked token.

use crate::error::RecordError;
use formpath_kernel::schema::{ATTR_CHILDREN, ATTR_LABEL, ATTR_TYPE};
use formpath_kernel::{MatchRule, flatten, is_blank, is_checked, name_label_group_triples, scalar_text};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

const SECTION_TYPE: &str = "section";

/// Answer kind of a schema question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnswerType {
    Checkbox,
    Radio,
    Select,
    MultiSelect,
    Text,
    TextArea,
    Number,
    Date,
    File,
    Declaration,
    Other(String),
}

impl AnswerType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Checkbox => "checkbox",
            Self::Radio => "radiobuttons",
            Self::Select => "select",
            Self::MultiSelect => "multi-select",
            Self::Text => "text",
            Self::TextArea => "text_area",
            Self::Number => "number",
            Self::Date => "date",
            Self::File => "file",
            Self::Declaration => "declaration",
            Self::Other(other) => other,
        }
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

impl From<&str> for AnswerType {
    fn from(value: &str) -> Self {
        match value {
            "checkbox" => Self::Checkbox,
            "radiobuttons" => Self::Radio,
            "select" => Self::Select,
            "multi-select" => Self::MultiSelect,
            "text" => Self::Text,
            "text_area" => Self::TextArea,
            "number" => Self::Number,
            "date" => Self::Date,
            "file" => Self::File,
            "declaration" => Self::Declaration,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for AnswerType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<AnswerType> for String {
    fn from(value: AnswerType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to look for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionQuery {
    /// Section label; spaces are ignored when comparing.
    pub section_label: String,

    /// Question label, compared exactly.
    pub question: String,

    pub answer_type: AnswerType,

    /// Option label for checkboxes, search text otherwise.
    pub answer: String,
}

/// A matching answer, keyed by its question (or option) label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionHit {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone)]
struct Candidate {
    name: String,
    label: String,
}

fn strip_spaces(text: &str) -> String {
    text.replace(' ', "")
}

fn candidate_names(section: &Value, query: &SectionQuery) -> Result<Vec<Candidate>, RecordError> {
    let groups = name_label_group_triples(section)?;
    let mut candidates = Vec::new();
    for question in &groups {
        if question.label() != Some(query.question.as_str()) {
            continue;
        }
        let Some(question_name) = question.name() else {
            continue;
        };
        if query.answer_type.is_checkbox() {
            for option in &groups {
                if option.group() == Some(question_name)
                    && option.label() == Some(query.answer.as_str())
                    && let Some(name) = option.name()
                {
                    candidates.push(Candidate {
                        name: name.to_string(),
                        label: query.answer.clone(),
                    });
                }
            }
        } else {
            candidates.push(Candidate {
                name: question_name.to_string(),
                label: query.question.clone(),
            });
        }
    }
    Ok(candidates)
}

fn section_items(schema: &Value) -> Result<&[Value], RecordError> {
    match schema {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Ok(std::slice::from_ref(schema)),
        _ => Err(RecordError::MalformedSchema(
            "expected a list of schema sections".to_string(),
        )),
    }
}

/// Candidate answer names for `query` in the first section whose label
/// matches.
fn resolve_candidates(schema: &Value, query: &SectionQuery) -> Result<Vec<Candidate>, RecordError> {
    let wanted = strip_spaces(&query.section_label);
    for (index, item) in section_items(schema)?.iter().enumerate() {
        let kind = item.get(ATTR_TYPE).and_then(Value::as_str).ok_or_else(|| {
            RecordError::MalformedSchema(format!("schema item {index} has no string `type`"))
        })?;
        if kind != SECTION_TYPE {
            continue;
        }
        let Some(label) = item.get(ATTR_LABEL).and_then(Value::as_str) else {
            continue;
        };
        if label.is_empty() || strip_spaces(label) != wanted {
            continue;
        }
        let has_children = item
            .get(ATTR_CHILDREN)
            .is_some_and(|children| match children {
                Value::Array(list) => !list.is_empty(),
                Value::Null => false,
                _ => true,
            });
        tracing::debug!(section = label, has_children, "matched schema section");
        if !has_children {
            return Ok(Vec::new());
        }
        return candidate_names(item, query);
    }
    tracing::debug!(section = %query.section_label, "no schema section matched");
    Ok(Vec::new())
}

/// Answers in `data` that satisfy `query` against `schema`.
///
/// Multiselect answers carry a trailing positional segment, which is
/// dropped before matching names. Each answer yields at most one hit.
pub fn search_section(
    schema: &Value,
    query: &SectionQuery,
    data: &Value,
) -> Result<Vec<SectionHit>, RecordError> {
    let candidates = resolve_candidates(schema, query)?;
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let flat = flatten(data)?;
    let needle = query.answer.trim();
    let mut hits = Vec::new();
    for entry in &flat {
        if is_blank(&entry.value) {
            continue;
        }
        let key_name = flat.render(&entry.path.without_trailing_index());
        let hit = candidates.iter().find(|candidate| {
            if !MatchRule::EndsWith.matches(&key_name, &candidate.name) {
                return false;
            }
            if query.answer_type.is_checkbox() {
                is_checked(&entry.value)
            } else {
                MatchRule::ContainsIgnoreCase.matches(&scalar_text(&entry.value), needle)
            }
        });
        if let Some(candidate) = hit {
            hits.push(SectionHit {
                key: candidate.label.clone(),
                value: entry.value.clone(),
            });
        }
    }
    Ok(hits)
}
