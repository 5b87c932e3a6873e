//! Watch-list document model
//!
//! The declarative form of a watch list: a versioned JSON document whose
//! descriptors mirror the expected XML hierarchy (not the full schema).
//!
//! ```json
//! {
//!   "version": "1",
//!   "nodes": [
//!     { "name": "Items", "type": "element", "children": [
//!       { "name": "Item", "type": "leaf" }
//!     ]}
//!   ]
//! }
//! ```
//!
//! Loaded once at parser construction and immutable thereafter.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// The only watch-list document version this crate understands.
/// Unknown versions are rejected outright; there is no silent fallback.
pub const SUPPORTED_VERSION: &str = "1";

/// Classification of a watched tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// Structural element; its children are other watched tags.
    Element,
    /// Value-bearing leaf; the raw text between its open and close tag
    /// becomes the node's scalar value.
    Leaf,
}

/// One watched tag descriptor, optionally nesting child descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedTag {
    /// Tag name as it appears in the document, without angle brackets.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TagKind,
    /// Expected child descriptors. Names must be unique among siblings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WatchedTag>,
}

impl WatchedTag {
    /// Create an element descriptor with the given children.
    pub fn element(name: impl Into<String>, children: Vec<WatchedTag>) -> Self {
        WatchedTag {
            name: name.into(),
            kind: TagKind::Element,
            children,
        }
    }

    /// Create a value-bearing leaf descriptor.
    pub fn leaf(name: impl Into<String>) -> Self {
        WatchedTag {
            name: name.into(),
            kind: TagKind::Leaf,
            children: Vec::new(),
        }
    }
}

/// A complete, versioned watch-list document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchSpec {
    pub version: String,
    pub nodes: Vec<WatchedTag>,
}

impl WatchSpec {
    /// Build a spec at the supported version from descriptors.
    pub fn new(nodes: Vec<WatchedTag>) -> Self {
        WatchSpec {
            version: SUPPORTED_VERSION.to_string(),
            nodes,
        }
    }

    /// Parse a watch-list JSON document.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        serde_json::from_str(json).map_err(|e| SpecError::Document(e.to_string()))
    }
}
