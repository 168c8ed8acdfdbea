//! Proposal records and the pipelines run over their answers.

use crate::error::RecordError;
use formpath_kernel::{DocumentDiff, MissingField, diff, missing_required_fields, remove_all};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An application as handed over by the storage layer.
///
/// `data` is persisted as a one-element list wrapping the answer document;
/// [`Proposal::answers`] unwraps it. A bare answer object is accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub lodgement_number: String,

    #[serde(default)]
    pub application_type: String,

    #[serde(default)]
    pub data: Value,

    #[serde(default)]
    pub schema: Value,

    /// Answers auto-filled from map/GIS layer lookups, one `{name, ...}`
    /// record per answer.
    #[serde(default)]
    pub layer_data: Vec<Value>,

    /// Answers of the application this one superseded.
    #[serde(default)]
    pub previous_data: Option<Value>,
}

impl Proposal {
    pub fn new(lodgement_number: impl Into<String>, data: Value, schema: Value) -> Self {
        Self {
            id: 0,
            lodgement_number: lodgement_number.into(),
            application_type: String::new(),
            data,
            schema,
            layer_data: Vec::new(),
            previous_data: None,
        }
    }

    /// The answer document, if any has been saved.
    pub fn answers(&self) -> Option<&Value> {
        unwrap_answers(&self.data)
    }

    /// The previous application's answer document.
    pub fn previous_answers(&self) -> Option<&Value> {
        self.previous_data.as_ref().and_then(unwrap_answers)
    }
}

fn unwrap_answers(data: &Value) -> Option<&Value> {
    match data {
        Value::Null => None,
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

/// Required questions left blank in the proposal's answers.
pub fn proposal_missing_fields(proposal: &Proposal) -> Result<Vec<MissingField>, RecordError> {
    let Some(answers) = proposal.answers() else {
        return Ok(Vec::new());
    };
    Ok(missing_required_fields(answers, &proposal.schema)?)
}

/// Labelled changes between a proposal and the one it superseded, using
/// the current proposal's schema.
pub fn compare_proposal(current: &Proposal, previous: &Proposal) -> Result<DocumentDiff, RecordError> {
    let (Some(now), Some(before)) = (current.answers(), previous.answers()) else {
        return Ok(DocumentDiff::default());
    };
    Ok(diff(now, before, &current.schema)?)
}

/// Labelled changes against the answers recorded in `previous_data`.
pub fn compare_with_previous(proposal: &Proposal) -> Result<DocumentDiff, RecordError> {
    let (Some(now), Some(before)) = (proposal.answers(), proposal.previous_answers()) else {
        return Ok(DocumentDiff::default());
    };
    Ok(diff(now, before, &proposal.schema)?)
}

/// Answer names recorded as pre-filled by layer lookups.
///
/// Entries without `name` are skipped; a non-object entry or a non-string
/// `name` is malformed.
pub fn prefilled_answer_names(layer_data: &[Value]) -> Result<Vec<String>, RecordError> {
    let mut names = Vec::new();
    for (index, layer) in layer_data.iter().enumerate() {
        let Value::Object(members) = layer else {
            return Err(RecordError::MalformedLayerData {
                index,
                reason: "expected an object".to_string(),
            });
        };
        match members.get("name") {
            None => tracing::warn!(index, "layer_data entry has no name; skipping"),
            Some(Value::String(name)) => names.push(name.clone()),
            Some(_) => {
                return Err(RecordError::MalformedLayerData {
                    index,
                    reason: "`name` must be a string".to_string(),
                });
            }
        }
    }
    Ok(names)
}

/// Strip every answer named in `layer_data` so stale auto-filled values are
/// not resubmitted when the form is reopened.
///
/// The proposal is consumed. `data` keeps its shape; when it is a list,
/// every element is redacted.
pub fn remove_prefilled_data(mut proposal: Proposal) -> Result<Proposal, RecordError> {
    let names = prefilled_answer_names(&proposal.layer_data)?;
    if names.is_empty() || proposal.answers().is_none() {
        return Ok(proposal);
    }

    let removed = remove_all(&mut proposal.data, names.as_slice());
    tracing::debug!(
        proposal = %proposal.lodgement_number,
        names = names.len(),
        removed,
        "stripped pre-filled answers"
    );
    Ok(proposal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!([{
            "type": "section",
            "name": "summary",
            "label": "Summary",
            "children": [
                {"name": "Section0-0", "label": "Title", "isRequired": "true"},
                {"name": "Section1-0", "label": "Location", "isRequired": "true"}
            ]
        }])
    }

    #[test]
    fn answers_unwrap_persisted_list() {
        let proposal = Proposal::new("P000001", json!([{"a": 1}]), Value::Null);
        assert_eq!(proposal.answers(), Some(&json!({"a": 1})));

        let bare = Proposal::new("P000002", json!({"a": 1}), Value::Null);
        assert_eq!(bare.answers(), Some(&json!({"a": 1})));

        let empty = Proposal::new("P000003", json!([]), Value::Null);
        assert_eq!(empty.answers(), None);
    }

    #[test]
    fn redaction_strips_layer_answers() {
        let mut proposal = Proposal::new(
            "P000010",
            json!([{"Section1-0": "auto", "Section2-0": "manual"}]),
            schema(),
        );
        proposal.layer_data = vec![json!({"name": "Section1-0", "layer_name": "cadastre"})];

        let redacted = remove_prefilled_data(proposal).unwrap();
        assert_eq!(redacted.data, json!([{"Section2-0": "manual"}]));
    }

    #[test]
    fn redaction_covers_every_listed_answer_document() {
        let mut proposal = Proposal::new(
            "P000015",
            json!([
                {"Section1-0": "auto", "Section2-0": "manual"},
                {"Section1-0": "auto again", "Section3-0": "kept"}
            ]),
            schema(),
        );
        proposal.layer_data = vec![json!({"name": "Section1-0"})];

        let redacted = remove_prefilled_data(proposal).unwrap();
        assert_eq!(
            redacted.data,
            json!([{"Section2-0": "manual"}, {"Section3-0": "kept"}])
        );
    }

    #[test]
    fn bare_answer_document_stays_bare() {
        let mut proposal = Proposal::new("P000016", json!({"Section1-0": "auto", "b": 1}), schema());
        proposal.layer_data = vec![json!({"name": "Section1-0"})];
        let redacted = remove_prefilled_data(proposal).unwrap();
        assert_eq!(redacted.data, json!({"b": 1}));
    }

    #[test]
    fn redaction_without_layer_names_is_a_no_op() {
        let mut proposal = Proposal::new("P000011", json!([{"Section1-0": "auto"}]), schema());
        proposal.layer_data = vec![json!({"layer_name": "cadastre"})];
        let before = proposal.clone();
        assert_eq!(remove_prefilled_data(proposal).unwrap(), before);
    }

    #[test]
    fn non_string_layer_name_is_malformed() {
        let mut proposal = Proposal::new("P000012", json!([{"Section1-0": "auto"}]), schema());
        proposal.layer_data = vec![json!({"name": "ok"}), json!({"name": 7})];
        match remove_prefilled_data(proposal) {
            Err(RecordError::MalformedLayerData { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected malformed layer data, got {other:?}"),
        }
    }

    #[test]
    fn missing_fields_after_redaction() {
        let mut proposal = Proposal::new(
            "P000013",
            json!([{"summary": [{"Section0-0": "Hives", "Section1-0": ""}]}]),
            schema(),
        );
        proposal.layer_data = vec![json!({"name": "Section0-0"})];
        let redacted = remove_prefilled_data(proposal).unwrap();
        let missing = proposal_missing_fields(&redacted).unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].label, "Location");
    }

    #[test]
    fn compare_uses_current_schema() {
        let mut current = Proposal::new(
            "P000014",
            json!([{"summary": [{"Section0-0": "new title"}]}]),
            schema(),
        );
        current.previous_data = Some(json!([{"summary": [{"Section0-0": "old title"}]}]));
        let previous = Proposal::new(
            "P000013",
            json!([{"summary": [{"Section0-0": "old title"}]}]),
            Value::Null,
        );

        let direct = compare_proposal(&current, &previous).unwrap();
        let recorded = compare_with_previous(&current).unwrap();
        assert_eq!(direct, recorded);
        assert_eq!(
            serde_json::to_value(&direct).unwrap(),
            json!({"summary.Section0-0": {"Title": ["new title", "old title"]}})
        );
    }
}
