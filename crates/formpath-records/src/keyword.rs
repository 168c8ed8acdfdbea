//! Keyword search across proposals, approvals, and compliances.
//!
//! Document-valued fields are searched by flattened value equality
//! (ignoring case); free-text fields by case-insensitive substring.
//! Structural errors in any searched document propagate.

use crate::error::RecordError;
use crate::proposal::Proposal;
use formpath_kernel::{MatchRule, ValueHit, search_values};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Which kind of record a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Proposal,
    Approval,
    Compliance,
}

/// One record that matched a keyword search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub number: String,
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub applicant: String,
    pub text: Value,
}

/// An issued approval with its lifecycle detail documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalRecord {
    pub id: u64,
    pub lodgement_number: String,
    pub applicant: Option<String>,
    pub surrender_details: Option<Value>,
    pub suspension_details: Option<Value>,
    pub cancellation_details: Option<String>,
}

/// A compliance return against an approval requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceRecord {
    pub id: u64,
    pub reference: String,
    pub applicant: Option<String>,
    pub text: Option<String>,
    pub requirement: Option<String>,
}

/// Hits within one proposal's answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalMatches {
    pub lodgement_number: String,
    pub hits: Vec<ValueHit>,
}

fn mentions_any<S: AsRef<str>>(text: &str, terms: &[S]) -> bool {
    terms
        .iter()
        .any(|term| MatchRule::ContainsIgnoreCase.matches(text, term.as_ref()))
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Value search over the answers of every proposal of `application_type`.
///
/// Proposals without saved answers are skipped.
pub fn search_proposals<S: AsRef<str>>(
    proposals: &[Proposal],
    terms: &[S],
    application_type: &str,
) -> Result<Vec<ProposalMatches>, RecordError> {
    let mut matches = Vec::new();
    for proposal in proposals {
        if proposal.application_type != application_type {
            continue;
        }
        let Some(answers) = proposal.answers() else {
            continue;
        };
        let hits = search_values(answers, terms)?;
        if !hits.is_empty() {
            matches.push(ProposalMatches {
                lodgement_number: proposal.lodgement_number.clone(),
                hits,
            });
        }
    }
    tracing::debug!(
        application_type,
        proposals = proposals.len(),
        matched = matches.len(),
        "searched proposal answers"
    );
    Ok(matches)
}

/// Keyword hits in an approval's surrender, suspension, and cancellation
/// details.
///
/// For detail documents the hit text is the last matching `{key, value}`.
pub fn search_approval<S: AsRef<str>>(
    approval: &ApprovalRecord,
    terms: &[S],
) -> Result<Vec<SearchHit>, RecordError> {
    let applicant = approval.applicant.clone().unwrap_or_default();
    let hit = |text: Value| SearchHit {
        number: approval.lodgement_number.clone(),
        id: approval.id,
        kind: RecordKind::Approval,
        applicant: applicant.clone(),
        text,
    };

    let mut hits = Vec::new();
    for details in [&approval.surrender_details, &approval.suspension_details]
        .into_iter()
        .flatten()
        .filter(|details| has_content(details))
    {
        if let Some(last) = search_values(details, terms)?.pop() {
            hits.push(hit(json!({"key": last.key, "value": last.value})));
        }
    }
    if let Some(details) = approval.cancellation_details.as_deref()
        && !details.is_empty()
        && mentions_any(details, terms)
    {
        hits.push(hit(Value::String(details.to_string())));
    }
    Ok(hits)
}

/// Keyword hits in a compliance's text and its requirement.
pub fn search_compliance<S: AsRef<str>>(compliance: &ComplianceRecord, terms: &[S]) -> Vec<SearchHit> {
    let applicant = compliance.applicant.clone().unwrap_or_default();
    [compliance.text.as_deref(), compliance.requirement.as_deref()]
        .into_iter()
        .flatten()
        .filter(|text| !text.is_empty() && mentions_any(text, terms))
        .map(|text| SearchHit {
            number: compliance.reference.clone(),
            id: compliance.id,
            kind: RecordKind::Compliance,
            applicant: applicant.clone(),
            text: Value::String(text.to_string()),
        })
        .collect()
}
