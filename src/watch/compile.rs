//! Watch-List Compiler
//!
//! Expands the declarative watch-list document into the flat set of exact
//! open/close byte sequences the byte matcher compares against. The
//! declared nesting is not consulted at match time; structure is
//! re-derived from the document itself while parsing.

use std::collections::HashSet;

use crate::error::SpecError;
use crate::watch::spec::{TagKind, WatchSpec, WatchedTag, SUPPORTED_VERSION};

/// A watched tag compiled to its exact wire form.
///
/// `open` is `<Name>` and `close` is `</Name>`; both are non-empty and
/// distinct by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTagPair {
    name: String,
    open: Box<[u8]>,
    close: Box<[u8]>,
    kind: TagKind,
}

impl CompiledTagPair {
    fn new(name: &str, kind: TagKind) -> Self {
        CompiledTagPair {
            name: name.to_string(),
            open: format!("<{name}>").into_bytes().into_boxed_slice(),
            close: format!("</{name}>").into_bytes().into_boxed_slice(),
            kind,
        }
    }

    /// Tag name without angle brackets.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exact open-tag byte sequence, e.g. `<Item>`.
    #[inline]
    pub fn open(&self) -> &[u8] {
        &self.open
    }

    /// Exact close-tag byte sequence, e.g. `</Item>`.
    #[inline]
    pub fn close(&self) -> &[u8] {
        &self.close
    }

    #[inline]
    pub fn kind(&self) -> TagKind {
        self.kind
    }
}

/// The flat set of compiled pairs for one parser instance.
///
/// Owned exclusively by the `TreeBuilder` that compiled it; never shared
/// across parses.
#[derive(Debug, Clone)]
pub struct CompiledTagSet {
    pairs: Vec<CompiledTagPair>,
    /// Length of the longest open/close sequence; bounds the carry-over
    /// buffer to `longest_seq - 1` bytes.
    longest_seq: usize,
}

impl CompiledTagSet {
    #[inline]
    pub fn pairs(&self) -> &[CompiledTagPair] {
        &self.pairs
    }

    #[inline]
    pub fn longest_seq(&self) -> usize {
        self.longest_seq
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Compile a watch-list document into its flat byte-sequence set.
///
/// Pure: same spec in, same set out. Fails when the declared version is
/// unrecognized, a name is empty, or two siblings share a name. Tags with
/// the same name at different depths compile to identical pairs and are
/// de-duplicated.
pub fn compile(spec: &WatchSpec) -> Result<CompiledTagSet, SpecError> {
    if spec.version != SUPPORTED_VERSION {
        return Err(SpecError::UnsupportedVersion(spec.version.clone()));
    }

    let mut pairs: Vec<CompiledTagPair> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    compile_level(&spec.nodes, &mut pairs, &mut seen)?;

    let longest_seq = pairs.iter().map(|p| p.close.len()).max().unwrap_or(0);

    tracing::debug!(tags = pairs.len(), longest_seq, "compiled watch list");

    Ok(CompiledTagSet { pairs, longest_seq })
}

fn compile_level(
    level: &[WatchedTag],
    pairs: &mut Vec<CompiledTagPair>,
    seen: &mut HashSet<String>,
) -> Result<(), SpecError> {
    let mut siblings: HashSet<&str> = HashSet::with_capacity(level.len());

    for tag in level {
        if tag.name.is_empty() {
            return Err(SpecError::EmptyName);
        }
        if !siblings.insert(tag.name.as_str()) {
            return Err(SpecError::DuplicateName(tag.name.clone()));
        }

        // Same name at a different depth re-compiles to identical bytes.
        if seen.insert(tag.name.clone()) {
            pairs.push(CompiledTagPair::new(&tag.name, tag.kind));
        }

        compile_level(&tag.children, pairs, seen)?;
    }

    Ok(())
}
