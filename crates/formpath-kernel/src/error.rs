//! Error types for kernel operations.

/// Errors arising from structurally invalid documents or schemas.
///
/// A key-search miss is not an error; lookups return `Option`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Two distinct leaves rendered to the same flattened key.
    #[error("key {key} is already used")]
    DuplicateKey { key: String },

    /// A schema node defines an attribute group but lacks a member the
    /// operation cannot proceed without.
    #[error("schema node at `{path}` is missing `{attribute}`")]
    MissingAttribute { path: String, attribute: String },
}
