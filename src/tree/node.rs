//! Tree Node model
//!
//! One node per matched element instance. Children are stored in document
//! order; each node records the byte-offset span of its element in the
//! original stream so downstream consumers can correlate external offset
//! ranges back to nodes.

use serde::Serialize;

use crate::watch::spec::TagKind;

/// Byte-offset span of an element in the original stream.
///
/// `open` is the offset of the `<` of the open tag; `close` is one past
/// the final `>` of the close tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub open: usize,
    pub close: usize,
}

impl Position {
    #[inline]
    pub const fn new(open: usize, close: usize) -> Self {
        Position { open, close }
    }

    /// True iff the span fully contains `[open, close]`.
    #[inline]
    pub const fn contains(&self, open: usize, close: usize) -> bool {
        self.open <= open && self.close >= close
    }

    /// Span length in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.close.saturating_sub(self.open)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scalar value of a value-bearing leaf element.
///
/// Leaf text that parses as a number is stored as one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Text(String),
    Number(f64),
}

impl ScalarValue {
    /// Interpret raw leaf bytes. Returns `None` for empty content and
    /// non-UTF-8 bytes; numeric text becomes `Number`.
    pub fn from_raw(raw: &[u8]) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let text = std::str::from_utf8(raw).ok()?;
        if let Ok(n) = text.trim().parse::<f64>() {
            return Some(ScalarValue::Number(n));
        }
        Some(ScalarValue::Text(text.to_string()))
    }

    /// The textual form, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            ScalarValue::Number(_) => None,
        }
    }

    /// The numeric form, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ScalarValue::Number(n) => Some(*n),
            ScalarValue::Text(_) => None,
        }
    }
}

/// One matched element instance.
///
/// Owned exclusively by its parent, except the root, which the builder
/// hands to its caller. Nodes are only ever appended, never re-parented,
/// so the tree is acyclic by construction and effectively immutable once
/// the parse completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub kind: TagKind,
    /// Scalar content for leaf elements; absent for structural elements
    /// and for leaves with empty content.
    pub value: Option<ScalarValue>,
    /// Child nodes in document order.
    pub children: Vec<TreeNode>,
    pub position: Position,
}

impl TreeNode {
    pub(crate) fn open(name: &str, kind: TagKind, open_offset: usize) -> Self {
        TreeNode {
            name: name.to_string(),
            kind,
            value: None,
            children: Vec::new(),
            position: Position::new(open_offset, 0),
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.kind == TagKind::Leaf
    }
}
