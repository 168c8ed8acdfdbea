//! Required-answer validation.
//!
//! Presence and blankness only: a required answer is missing when its
//! stored scalar trims to nothing. Type conformance is not checked.

use crate::error::FormError;
use crate::flatten::flatten;
use crate::matcher::MatchRule;
use crate::scalar::{is_blank, is_truthy_flag};
use crate::schema::{ATTR_IS_REQUIRED, ATTR_LABEL, ATTR_NAME, extract_grouped_attributes};
use serde::Serialize;
use serde_json::Value;

/// A required answer that was left blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingField {
    /// Flattened data key of the blank answer.
    pub path: String,
    pub label: String,
}

/// A question the schema marks as required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredQuestion {
    pub name: String,
    pub label: String,
}

/// Questions whose `isRequired` is truthy.
///
/// A required node without a string `name` or `label` is malformed.
pub fn required_questions(schema: &Value) -> Result<Vec<RequiredQuestion>, FormError> {
    let groups = extract_grouped_attributes(
        schema,
        ATTR_IS_REQUIRED,
        &[ATTR_IS_REQUIRED, ATTR_LABEL, ATTR_NAME],
    )?;
    let mut required = Vec::new();
    for group in &groups {
        if !group.get(ATTR_IS_REQUIRED).is_some_and(is_truthy_flag) {
            continue;
        }
        required.push(RequiredQuestion {
            name: group.require_str(ATTR_NAME)?.to_string(),
            label: group.require_str(ATTR_LABEL)?.to_string(),
        });
    }
    Ok(required)
}

/// Every data key ending in a required question's name whose value is
/// blank, in data order.
pub fn missing_required_fields(data: &Value, schema: &Value) -> Result<Vec<MissingField>, FormError> {
    let required = required_questions(schema)?;
    let flat = flatten(data)?;

    let mut missing = Vec::new();
    for entry in &flat {
        if !is_blank(&entry.value) {
            continue;
        }
        for question in &required {
            if MatchRule::EndsWith.matches(&entry.key, &question.name) {
                missing.push(MissingField {
                    path: entry.key.clone(),
                    label: question.label.clone(),
                });
            }
        }
    }

    tracing::debug!(
        required = required.len(),
        missing = missing.len(),
        "checked required answers"
    );
    Ok(missing)
}
