//! Engine configuration.
//!
//! ```toml
//! [flatten]
//! separator = "."
//! index_width = 4
//!
//! [proposal]
//! application_type = "Disturbance"
//! tenure_section = "Section1-0"
//! ```
//!
//! Every key is optional.

use crate::path::FlattenOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_APPLICATION_TYPE: &str = "Disturbance";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalConfig {
    /// Application type searched when none is given.
    pub application_type: String,

    /// Schema section whose ticked options name the proposal's tenures.
    pub tenure_section: Option<String>,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            application_type: DEFAULT_APPLICATION_TYPE.to_string(),
            tenure_section: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub flatten: FlattenOptions,
    pub proposal: ProposalConfig,
}

impl EngineConfig {
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flatten.separator.is_empty() {
            return Err(ConfigError::Invalid(
                "flatten.separator must not be empty".to_string(),
            ));
        }
        if self.flatten.index_width == 0 {
            return Err(ConfigError::Invalid(
                "flatten.index_width must be at least 1".to_string(),
            ));
        }
        if self.proposal.tenure_section.as_deref() == Some("") {
            return Err(ConfigError::Invalid(
                "proposal.tenure_section must not be empty when set".to_string(),
            ));
        }
        Ok(())
    }
}
