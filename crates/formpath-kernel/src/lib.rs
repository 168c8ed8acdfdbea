//! # Formpath Kernel
//!
//! A schema-driven form engine: answers (`data`) and question definitions
//! (`schema`) are independent JSON documents correlated only by matching
//! key paths.
//!
//! This crate is **shape-agnostic**: it has no fixed data model for
//! either tree. Every operation flattens one or both documents and joins
//! on path suffixes.
//!
//! ## Architecture
//!
//! ```text
//! flatten        ← Document → ordered {key.path.0000 → scalar}
//!     │
//! schema         ← same-node attribute groups {name, label, group, ...}
//!     │
//! matcher        ← data path ↔ schema group joins (MatchRule)
//!     │
//! validate, diff ← required blanks, labelled changes
//!
//! keys           ← find / remove members anywhere in a document
//! ```
//!
//! All operations are pure and synchronous except the removal functions,
//! which consume the document they are given.

pub mod config;
pub mod diff;
pub mod error;
pub mod flatten;
pub mod keys;
pub mod matcher;
pub mod path;
pub mod scalar;
pub mod schema;
pub mod search;
pub mod validate;

pub use config::{ConfigError, EngineConfig, ProposalConfig};
pub use diff::{Change, DocumentDiff, RawChange, changed_values, diff};
pub use error::FormError;
pub use flatten::{FlatDocument, FlatEntry, flatten, flatten_with};
pub use keys::{contains_key, find_value, remove_all, remove_first, remove_key, remove_keys};
pub use matcher::{
    CHECKBOX_SELECTED_TOKEN, MatchRule, SelectedOption, checkbox_selections, is_checked,
    label_for_path,
};
pub use path::{FlattenOptions, KeyPath, Segment};
pub use scalar::{is_blank, is_truthy_flag, scalar_text};
pub use schema::{
    AttributeGroup, extract_grouped_attributes, name_label_group_triples, name_label_pairs,
    schema_questions, search_label,
};
pub use search::{ValueHit, search_answer, search_paths, search_values};
pub use validate::{MissingField, RequiredQuestion, missing_required_fields, required_questions};
