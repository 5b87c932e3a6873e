//! Error types
//!
//! Two families: `SpecError` for watch-list compilation failures and
//! `ParseError` for structural or transport failures during a parse.
//! Traversal cancellation is not represented here; stopping a walk early
//! is a normal return, not an error.

use crate::source::TransportError;

/// Watch-list compilation failure. Fatal, surfaced immediately, no retry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SpecError {
    /// The watch-list document declares a version this parser does not know.
    #[error("unsupported watch-list version {0:?}")]
    UnsupportedVersion(String),

    /// Two descriptors share a name within the same sibling scope.
    #[error("duplicate tag name {0:?} in sibling scope")]
    DuplicateName(String),

    /// A descriptor with an empty name cannot produce tag byte sequences.
    #[error("tag descriptor with empty name")]
    EmptyName,

    /// The watch-list JSON could not be deserialized.
    #[error("malformed watch-list document: {0}")]
    Document(String),
}

/// Structural or transport failure of a single parse.
///
/// No partial tree is ever returned alongside one of these.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A watched close tag was observed that does not close the element
    /// currently open (or no element was open at all).
    #[error("malformed document: unexpected close tag </{name}> at offset {offset}")]
    MalformedTag { name: String, offset: usize },

    /// The stream ended while a watched element was still open.
    #[error("unclosed element <{name}> at end of stream")]
    UnclosedElement { name: String },

    /// The stream ended without any watched tag being matched.
    #[error("no watched tags found in document")]
    NoWatchedContent,

    /// The byte source failed before or during the parse.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
