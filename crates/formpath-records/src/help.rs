//! Help pages generated from schema help-text anchors.
//!
//! Questions may carry a help-text url whose markup embeds `anchor=<id>`.
//! The help page is one rich-text heading per question, linked to its
//! anchor when one is present.

use crate::error::RecordError;
use formpath_kernel::extract_grouped_attributes;
use formpath_kernel::schema::ATTR_LABEL;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

fn anchor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"anchor=([^"]*)"#).expect("anchor regex must compile"))
}

/// Who the help page is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpAudience {
    External,
    Assessor,
}

impl HelpAudience {
    /// Schema attribute holding this audience's help text.
    pub fn attribute(self) -> &'static str {
        match self {
            Self::External => "help_text_url",
            Self::Assessor => "help_text_assessor_url",
        }
    }
}

impl std::str::FromStr for HelpAudience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "external" => Ok(Self::External),
            "assessor" | "internal" => Ok(Self::Assessor),
            _ => Err(format!("unknown help audience: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEntry {
    pub label: String,
    pub help_text: String,
}

impl HelpEntry {
    pub fn anchor(&self) -> Option<&str> {
        anchor_re()
            .captures(&self.help_text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Every schema node that defines the audience's help attribute, with its
/// label. A help-text node without a label is malformed.
pub fn help_entries(schema: &Value, audience: HelpAudience) -> Result<Vec<HelpEntry>, RecordError> {
    let attribute = audience.attribute();
    let groups = extract_grouped_attributes(schema, attribute, &[attribute, ATTR_LABEL])?;
    let mut entries = Vec::with_capacity(groups.len());
    for group in &groups {
        entries.push(HelpEntry {
            label: group.require_str(ATTR_LABEL)?.to_string(),
            help_text: group.require_str(attribute)?.to_string(),
        });
    }
    Ok(entries)
}

pub fn render_help_page(entries: &[HelpEntry]) -> String {
    let mut richtext = String::new();
    for entry in entries {
        match entry.anchor() {
            Some(anchor) => richtext.push_str(&format!(
                "<h1><a id=\"{anchor}\" name=\"{anchor}\"> {} </a></h1><p>&nbsp;</p>",
                entry.label
            )),
            None => richtext.push_str(&format!("<h1> {} </h1><p>&nbsp;</p>", entry.label)),
        }
    }
    richtext
}

/// A versioned help page for one application type and audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpPage {
    pub application_type: String,
    pub audience: HelpAudience,
    pub version: u32,
    pub content: String,
}

impl HelpPage {
    /// The page following `latest_version` (or version 1), rendered from
    /// the latest schema. Fails when `latest_version` is already `u32::MAX`.
    pub fn next(
        application_type: impl Into<String>,
        audience: HelpAudience,
        latest_version: Option<u32>,
        schema: &Value,
    ) -> Result<Self, RecordError> {
        let version = match latest_version {
            None => 1,
            Some(latest) => latest
                .checked_add(1)
                .ok_or(RecordError::VersionOverflow { latest })?,
        };
        let entries = help_entries(schema, audience)?;
        Ok(Self {
            application_type: application_type.into(),
            audience,
            version,
            content: render_help_page(&entries),
        })
    }
}
