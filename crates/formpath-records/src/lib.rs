//! # formpath-records
//!
//! Record layer over the kernel.
//!
//! This crate provides:
//! - `Proposal`, `ApprovalRecord`, `ComplianceRecord` (already-materialized
//!   records as handed over by storage)
//! - pre-filled answer redaction before a form is reopened
//! - structured section/question search and keyword search
//! - tenure summaries and schema-derived help pages
//!
//! It performs no I/O. Loading and saving records is the caller's concern.

pub mod error;
pub mod help;
pub mod keyword;
pub mod proposal;
pub mod section;
pub mod tenure;

pub use error::RecordError;
pub use help::{HelpAudience, HelpEntry, HelpPage, help_entries, render_help_page};
pub use keyword::{
    ApprovalRecord, ComplianceRecord, ProposalMatches, RecordKind, SearchHit, search_approval,
    search_compliance, search_proposals,
};
pub use proposal::{
    Proposal, compare_proposal, compare_with_previous, prefilled_answer_names,
    proposal_missing_fields, remove_prefilled_data,
};
pub use section::{AnswerType, SectionHit, SectionQuery, search_section};
pub use tenure::{tenure_labels, tenure_summary};
