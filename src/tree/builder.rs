//! Tree Builder - the streaming parser
//!
//! Stateful state machine over byte-stream input. Chunks are fed in with
//! `push_chunk`; the builder keeps a stack of open nodes, an absolute
//! cursor, and a carry-over buffer holding the tail of the previous chunk
//! that could not yet be conclusively matched (at most the longest
//! compiled sequence minus one byte).
//!
//! Parsing is selective: only bytes matching a compiled tag pair produce
//! nodes. Everything else is skipped one position at a time, except that
//! raw text inside an open leaf element is captured as that node's scalar
//! value. Cost is proportional to input size times watch-list size, not
//! document complexity.

use memchr::memchr;

use crate::error::ParseError;
use crate::matcher::{matches_close, matches_open, MatchOutcome};
use crate::tree::node::{ScalarValue, TreeNode};
use crate::watch::compile::{compile, CompiledTagSet};
use crate::watch::spec::{TagKind, WatchSpec};

/// Streaming selective parser.
///
/// One instance per parse; all mutable state (stack, cursor, carry-over
/// buffer) is owned exclusively by the instance, so independent parses
/// never share anything.
pub struct TreeBuilder {
    tags: CompiledTagSet,
    /// Open, not-yet-closed nodes paired with their compiled-pair index.
    stack: Vec<(TreeNode, usize)>,
    /// Completed root, set when the outermost watched element closes.
    root: Option<TreeNode>,
    /// Unconsumed tail of the previous chunk.
    carry: Vec<u8>,
    /// Absolute stream offset of `carry[0]`.
    cursor: usize,
    /// Raw text accumulated inside the currently open leaf element.
    text: Vec<u8>,
}

impl TreeBuilder {
    /// Create a builder over an already-compiled tag set.
    pub fn new(tags: CompiledTagSet) -> Self {
        TreeBuilder {
            tags,
            stack: Vec::with_capacity(8),
            root: None,
            carry: Vec::new(),
            cursor: 0,
            text: Vec::new(),
        }
    }

    /// Compile `spec` and create a builder for it.
    pub fn from_spec(spec: &WatchSpec) -> Result<Self, crate::error::SpecError> {
        Ok(TreeBuilder::new(compile(spec)?))
    }

    /// Feed the next chunk of the stream. Chunks of any length are
    /// accepted, including empty ones; tag boundaries may fall anywhere.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Result<(), ParseError> {
        if chunk.is_empty() && self.carry.is_empty() {
            return Ok(());
        }

        let mut window = std::mem::take(&mut self.carry);
        window.extend_from_slice(chunk);

        let consumed = self.scan(&window)?;

        self.cursor += consumed;
        window.drain(..consumed);
        self.carry = window;

        Ok(())
    }

    /// Signal end of stream and take the result tree.
    ///
    /// Fails with `UnclosedElement` if any watched element is still open
    /// and with `NoWatchedContent` if nothing was ever matched. Leftover
    /// carry-over bytes matched no tag and are dropped.
    pub fn finish(mut self) -> Result<TreeNode, ParseError> {
        if let Some((node, _)) = self.stack.pop() {
            return Err(ParseError::UnclosedElement { name: node.name });
        }
        self.root.take().ok_or(ParseError::NoWatchedContent)
    }

    /// Scan the working window, consuming matched tags and skipped bytes.
    /// Returns how many bytes were conclusively consumed; the caller
    /// retains the rest as the new carry-over buffer.
    fn scan(&mut self, window: &[u8]) -> Result<usize, ParseError> {
        let base = self.cursor;
        let mut pos = 0;

        while pos < window.len() {
            // Every compiled sequence starts with '<'; jump straight to
            // the next candidate.
            if window[pos] != b'<' {
                let end = memchr(b'<', &window[pos..])
                    .map(|i| pos + i)
                    .unwrap_or(window.len());
                if self.in_leaf() {
                    self.text.extend_from_slice(&window[pos..end]);
                }
                pos = end;
                continue;
            }

            let mut hold = false;

            // Close test is active only against the pair of the element
            // currently on top of the stack.
            if let Some(&(_, top)) = self.stack.last() {
                match matches_close(window, pos, &self.tags.pairs()[top]) {
                    MatchOutcome::Match => {
                        pos += self.close_top(base + pos);
                        continue;
                    }
                    MatchOutcome::Insufficient => hold = true,
                    MatchOutcome::Mismatch => {}
                }
            }

            // Open tests are always active.
            let mut opened = None;
            for (idx, pair) in self.tags.pairs().iter().enumerate() {
                match matches_open(window, pos, pair) {
                    MatchOutcome::Match => {
                        opened = Some(idx);
                        break;
                    }
                    MatchOutcome::Insufficient => hold = true,
                    MatchOutcome::Mismatch => {}
                }
            }
            if let Some(idx) = opened {
                pos += self.open_element(idx, base + pos)?;
                continue;
            }

            // A close sequence that is not the stack top's is a structural
            // mismatch between spec and document; no silent recovery.
            let top = self.stack.last().map(|&(_, i)| i);
            for (idx, pair) in self.tags.pairs().iter().enumerate() {
                if Some(idx) == top {
                    continue;
                }
                match matches_close(window, pos, pair) {
                    MatchOutcome::Match => {
                        return Err(ParseError::MalformedTag {
                            name: pair.name().to_string(),
                            offset: base + pos,
                        });
                    }
                    MatchOutcome::Insufficient => hold = true,
                    MatchOutcome::Mismatch => {}
                }
            }

            if hold {
                // Possible match ran past the window end; retain the tail
                // and retry once more bytes arrive.
                break;
            }

            // A '<' that matches nothing watched is skipped like any
            // other byte.
            if self.in_leaf() {
                self.text.push(b'<');
            }
            pos += 1;
        }

        Ok(pos)
    }

    /// Whether the element on top of the stack captures text.
    #[inline]
    fn in_leaf(&self) -> bool {
        self.stack.last().map_or(false, |(node, _)| node.is_leaf())
    }

    /// Open a new element at absolute offset `at`. Returns the number of
    /// bytes the open tag consumed.
    fn open_element(&mut self, idx: usize, at: usize) -> Result<usize, ParseError> {
        let pair = &self.tags.pairs()[idx];

        // The result is a single root; a second watched element at the
        // outermost level diverges from the declared structure.
        if self.stack.is_empty() && self.root.is_some() {
            return Err(ParseError::MalformedTag {
                name: pair.name().to_string(),
                offset: at,
            });
        }

        tracing::trace!(tag = pair.name(), offset = at, "open");

        let node = TreeNode::open(pair.name(), pair.kind(), at);
        let open_len = pair.open().len();
        self.text.clear();
        self.stack.push((node, idx));

        Ok(open_len)
    }

    /// Close the element on top of the stack; its close tag starts at
    /// absolute offset `at`. Returns the number of bytes consumed.
    fn close_top(&mut self, at: usize) -> usize {
        let Some((mut node, idx)) = self.stack.pop() else {
            return 0;
        };
        let close_len = self.tags.pairs()[idx].close().len();

        node.position.close = at + close_len;
        if node.kind == TagKind::Leaf {
            node.value = ScalarValue::from_raw(&self.text);
        }
        self.text.clear();

        tracing::trace!(tag = node.name.as_str(), offset = at, "close");

        match self.stack.last_mut() {
            Some((parent, _)) => parent.children.push(node),
            None => self.root = Some(node),
        }

        close_len
    }
}

/// Parse a complete in-memory document in one shot.
pub fn parse_bytes(tags: CompiledTagSet, bytes: &[u8]) -> Result<TreeNode, ParseError> {
    let mut builder = TreeBuilder::new(tags);
    builder.push_chunk(bytes)?;
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watch::spec::WatchedTag;
    use pretty_assertions::assert_eq;

    const DOC: &[u8] = b"<Items><Item>A</Item><Item>B</Item></Items>";

    fn items_set() -> CompiledTagSet {
        let spec = WatchSpec::new(vec![WatchedTag::element(
            "Items",
            vec![WatchedTag::leaf("Item")],
        )]);
        compile(&spec).unwrap()
    }

    #[test]
    fn test_single_chunk_document() {
        let root = parse_bytes(items_set(), DOC).unwrap();

        assert_eq!(root.name, "Items");
        assert_eq!(root.children.len(), 2);
        assert_eq!(
            root.children[0].value,
            Some(ScalarValue::Text("A".to_string()))
        );
        assert_eq!(
            root.children[1].value,
            Some(ScalarValue::Text("B".to_string()))
        );
    }

    #[test]
    fn test_offsets_nest_and_increase() {
        let root = parse_bytes(items_set(), DOC).unwrap();

        assert_eq!(root.position.open, 0);
        assert_eq!(root.position.close, DOC.len());

        let mut last_close = root.position.open;
        for child in &root.children {
            assert!(child.position.open >= last_close);
            assert!(child.position.close > child.position.open);
            assert!(child.position.open > root.position.open);
            assert!(child.position.close < root.position.close);
            last_close = child.position.close;
        }
    }

    #[test]
    fn test_split_at_every_offset_matches_single_chunk() {
        let whole = parse_bytes(items_set(), DOC).unwrap();

        for split in 0..=DOC.len() {
            let mut builder = TreeBuilder::new(items_set());
            builder.push_chunk(&DOC[..split]).unwrap();
            builder.push_chunk(&DOC[split..]).unwrap();
            let root = builder.finish().unwrap();
            assert_eq!(root, whole, "split at {split}");
        }
    }

    #[test]
    fn test_byte_at_a_time() {
        let whole = parse_bytes(items_set(), DOC).unwrap();

        let mut builder = TreeBuilder::new(items_set());
        for byte in DOC {
            builder.push_chunk(std::slice::from_ref(byte)).unwrap();
        }
        assert_eq!(builder.finish().unwrap(), whole);
    }

    #[test]
    fn test_empty_chunks_are_accepted() {
        let mut builder = TreeBuilder::new(items_set());
        builder.push_chunk(b"").unwrap();
        builder.push_chunk(&DOC[..10]).unwrap();
        builder.push_chunk(b"").unwrap();
        builder.push_chunk(&DOC[10..]).unwrap();
        assert_eq!(builder.finish().unwrap().children.len(), 2);
    }

    #[test]
    fn test_unwatched_content_is_skipped() {
        let doc = b"<?xml version=\"1.0\"?><Envelope><Items>\
                    <Ignored>junk</Ignored><Item>A</Item></Items></Envelope>";
        let root = parse_bytes(items_set(), doc).unwrap();

        assert_eq!(root.name, "Items");
        assert_eq!(root.children.len(), 1);
        assert_eq!(
            root.children[0].value,
            Some(ScalarValue::Text("A".to_string()))
        );
    }

    #[test]
    fn test_numeric_leaf_value() {
        let root = parse_bytes(items_set(), b"<Items><Item>500</Item></Items>").unwrap();
        assert_eq!(root.children[0].value, Some(ScalarValue::Number(500.0)));
    }

    #[test]
    fn test_empty_leaf_has_no_value() {
        let root = parse_bytes(items_set(), b"<Items><Item></Item></Items>").unwrap();
        assert_eq!(root.children[0].value, None);
    }

    #[test]
    fn test_leaf_text_split_across_chunks() {
        let mut builder = TreeBuilder::new(items_set());
        builder.push_chunk(b"<Items><Item>hel").unwrap();
        builder.push_chunk(b"lo world</Item></Items>").unwrap();
        let root = builder.finish().unwrap();
        assert_eq!(
            root.children[0].value,
            Some(ScalarValue::Text("hello world".to_string()))
        );
    }

    #[test]
    fn test_unclosed_element_at_eof() {
        let mut builder = TreeBuilder::new(items_set());
        builder.push_chunk(b"<Items><Item>A").unwrap();
        let err = builder.finish().unwrap_err();
        assert!(matches!(err, ParseError::UnclosedElement { name } if name == "Item"));
    }

    #[test]
    fn test_mismatched_close_is_malformed() {
        let mut builder = TreeBuilder::new(items_set());
        let err = builder
            .push_chunk(b"<Items><Item>A</Items>")
            .unwrap_err();
        assert!(matches!(err, ParseError::MalformedTag { name, .. } if name == "Items"));
    }

    #[test]
    fn test_close_without_open_is_malformed() {
        let mut builder = TreeBuilder::new(items_set());
        let err = builder.push_chunk(b"</Item>").unwrap_err();
        assert!(matches!(err, ParseError::MalformedTag { offset: 0, .. }));
    }

    #[test]
    fn test_second_root_is_malformed() {
        let mut builder = TreeBuilder::new(items_set());
        let err = builder
            .push_chunk(b"<Items></Items><Items></Items>")
            .unwrap_err();
        assert!(matches!(err, ParseError::MalformedTag { name, .. } if name == "Items"));
    }

    #[test]
    fn test_no_watched_content() {
        let mut builder = TreeBuilder::new(items_set());
        builder.push_chunk(b"<Other>nothing here</Other>").unwrap();
        let err = builder.finish().unwrap_err();
        assert!(matches!(err, ParseError::NoWatchedContent));
    }

    #[test]
    fn test_carry_over_is_bounded() {
        let set = items_set();
        let bound = set.longest_seq() - 1;
        let mut builder = TreeBuilder::new(set);

        // Stop right inside the longest close tag.
        builder.push_chunk(b"<Items><Item>A</Item></Item").unwrap();
        assert!(builder.carry.len() <= bound);

        builder.push_chunk(b"s>").unwrap();
        assert_eq!(builder.finish().unwrap().name, "Items");
    }

    #[test]
    fn test_lookalike_tag_names_do_not_collide() {
        // "<Item>" is a prefix of nothing, but "</Item" is a prefix of
        // "</Items>" up to the final byte.
        let doc = b"<Items><Item>x</Item></Items>";
        for split in 0..=doc.len() {
            let mut builder = TreeBuilder::new(items_set());
            builder.push_chunk(&doc[..split]).unwrap();
            builder.push_chunk(&doc[split..]).unwrap();
            let root = builder.finish().unwrap();
            assert_eq!(root.children.len(), 1, "split at {split}");
        }
    }

    #[test]
    fn test_deeply_nested_spec() {
        let spec = WatchSpec::new(vec![WatchedTag::element(
            "A",
            vec![WatchedTag::element("B", vec![WatchedTag::leaf("C")])],
        )]);
        let root = parse_bytes(
            compile(&spec).unwrap(),
            b"<A>skip<B>this<C>deep</C></B>too</A>",
        )
        .unwrap();

        assert_eq!(root.name, "A");
        assert_eq!(root.children[0].name, "B");
        assert_eq!(
            root.children[0].children[0].value,
            Some(ScalarValue::Text("deep".to_string()))
        );
    }

    #[test]
    fn test_stray_angle_bracket_in_leaf_text() {
        let root = parse_bytes(items_set(), b"<Items><Item>a < b</Item></Items>").unwrap();
        assert_eq!(
            root.children[0].value,
            Some(ScalarValue::Text("a < b".to_string()))
        );
    }
}
