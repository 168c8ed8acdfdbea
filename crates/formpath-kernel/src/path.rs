//! Structured key paths.
//!
//! A key path addresses one scalar inside a document. It is kept as a
//! sequence of segments and only rendered to a dotted string at the edge:
//!
//! ```text
//! {"a": [{"b": 1}, {"b": 2}]}
//!     a.0000.b → 1
//!     a.0001.b → 2
//! ```
//!
//! Sibling and parent computation work on segments, so a member name that
//! itself contains the separator cannot alias a different position.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const DEFAULT_SEPARATOR: &str = ".";
pub const DEFAULT_INDEX_WIDTH: usize = 4;

/// Rendering parameters for flattened keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct FlattenOptions {
    /// Joins segments in the rendered key.
    pub separator: String,

    /// Zero-padded width of positional segments.
    pub index_width: usize,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            index_width: DEFAULT_INDEX_WIDTH,
        }
    }
}

/// One step into a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Object member name.
    Key(String),

    /// Position inside a multi-element array.
    Index(usize),
}

impl Segment {
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(name) => Some(name),
            Self::Index(_) => None,
        }
    }

    fn render_into(&self, out: &mut String, options: &FlattenOptions) {
        match self {
            Self::Key(name) => out.push_str(name),
            Self::Index(index) => {
                let _ = write!(out, "{index:0>width$}", width = options.index_width);
            }
        }
    }

    pub fn render(&self, options: &FlattenOptions) -> String {
        let mut out = String::new();
        self.render_into(&mut out, options);
        out
    }
}

/// A sequence of segments from the document root to a scalar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath(Vec<Segment>);

impl KeyPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// The member name of the final segment, if it is an object key.
    pub fn last_key(&self) -> Option<&str> {
        self.last().and_then(Segment::as_key)
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    /// The path without its final segment. The root is its own parent.
    pub fn parent(&self) -> Self {
        let mut segments = self.0.clone();
        segments.pop();
        Self(segments)
    }

    /// The path that shares this path's parent but ends in `name`.
    pub fn sibling(&self, name: &str) -> Self {
        self.parent().child(Segment::Key(name.to_string()))
    }

    /// Drop a trailing positional segment, as produced by multi-valued
    /// answers such as multiselects.
    pub fn without_trailing_index(&self) -> Self {
        match self.last() {
            Some(Segment::Index(_)) => self.parent(),
            _ => self.clone(),
        }
    }

    pub fn render(&self, options: &FlattenOptions) -> String {
        let mut out = String::new();
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                out.push_str(&options.separator);
            }
            segment.render_into(&mut out, options);
        }
        out
    }
}

impl From<Vec<Segment>> for KeyPath {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}
