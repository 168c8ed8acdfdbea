//! Error types for record pipelines.

use formpath_kernel::FormError;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Form(#[from] FormError),

    /// A `layer_data` entry cannot name the answer it pre-filled.
    #[error("layer_data entry {index}: {reason}")]
    MalformedLayerData { index: usize, reason: String },

    #[error("malformed schema: {0}")]
    MalformedSchema(String),

    /// The latest stored help page already has the highest version.
    #[error("help page version {latest} has no successor")]
    VersionOverflow { latest: u32 },
}
