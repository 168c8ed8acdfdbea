//! Tenure summary: the labels of the ticked options of the tenure
//! checkbox question, cross-referenced from answers to schema.

use crate::error::RecordError;
use crate::proposal::Proposal;
use formpath_kernel::{ProposalConfig, checkbox_selections, flatten, name_label_group_triples};

/// Labels of the options of checkbox question `tenure_section` that are
/// ticked in the proposal's answers, in schema order, joined with `", "`.
pub fn tenure_labels(proposal: &Proposal, tenure_section: &str) -> Result<String, RecordError> {
    let Some(answers) = proposal.answers() else {
        return Ok(String::new());
    };

    let flat = flatten(answers)?;
    let options = name_label_group_triples(&proposal.schema)?;
    let labels: Vec<String> = checkbox_selections(&options, tenure_section, &flat)
        .into_iter()
        .map(|selected| selected.label)
        .collect();
    Ok(labels.join(", "))
}

/// [`tenure_labels`] for the configured tenure section; `None` when no
/// section is configured.
pub fn tenure_summary(proposal: &Proposal, config: &ProposalConfig) -> Result<Option<String>, RecordError> {
    config
        .tenure_section
        .as_deref()
        .map(|section| tenure_labels(proposal, section))
        .transpose()
}
