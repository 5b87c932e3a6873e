//! tagwatch - selective streaming XML parsing
//!
//! Given a byte stream and a declarative watch list of tag names, build a
//! tree of only the matched elements and skip everything else. Matching
//! compares raw byte sequences (no decoding), tolerates tag boundaries
//! split across chunks, and records each node's byte-offset span for
//! later range queries.
//!
//! Pipeline:
//! 1. A versioned watch-list document ([`WatchSpec`]) is compiled once
//!    into exact open/close byte sequences ([`watch::compile`]).
//! 2. [`TreeBuilder`] consumes chunks and emits a [`TreeNode`] tree.
//! 3. [`tree::traverse`] walks the tree (DFS / BFS-to-level) with
//!    sentinel-based early cancellation; [`flatten::to_plain`] derives a
//!    plain-data mapping; [`range::is_in_range`] answers offset queries.
//!
//! ```
//! use tagwatch::{compile, parse_bytes, ScalarValue, WatchSpec, WatchedTag};
//!
//! let spec = WatchSpec::new(vec![WatchedTag::element(
//!     "Items",
//!     vec![WatchedTag::leaf("Item")],
//! )]);
//! let tags = compile(&spec)?;
//!
//! let root = parse_bytes(tags, b"<Items><Item>A</Item><Item>B</Item></Items>")?;
//! assert_eq!(root.children.len(), 2);
//! assert_eq!(root.children[0].value, Some(ScalarValue::Text("A".into())));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod flatten;
pub mod matcher;
pub mod range;
pub mod source;
pub mod tree;
pub mod watch;

pub use error::{ParseError, SpecError};
pub use flatten::to_plain;
pub use matcher::MatchOutcome;
pub use range::is_in_range;
pub use source::{parse_source, ChunkSource, ReadSource, TransportError};
pub use tree::builder::parse_bytes;
pub use tree::{
    bfs_to_level, dfs, dfs_with_leave, Position, ScalarValue, TreeBuilder, TreeNode, VisitFlow,
};
pub use watch::{
    compile, CompiledTagPair, CompiledTagSet, TagKind, WatchSpec, WatchedTag, SUPPORTED_VERSION,
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// End-to-end: watch list over a SOAP-ish response, derived mapping.
    #[test]
    fn test_watch_list_to_plain_data() {
        let spec = WatchSpec::from_json(
            r#"{"version":"1","nodes":[
                {"name":"Items","type":"element","children":[
                    {"name":"Item","type":"leaf"}
                ]}
            ]}"#,
        )
        .unwrap();

        let doc = b"<soap:Envelope><soap:Body>\
                    <Items><Item>A</Item><Item>B</Item></Items>\
                    </soap:Body></soap:Envelope>";
        let root = parse_bytes(compile(&spec).unwrap(), doc).unwrap();

        assert_eq!(
            to_plain(&root),
            serde_json::json!({ "Items": { "Item": ["A", "B"] } })
        );

        // Span of the first child sits strictly inside the root's span.
        let child = &root.children[0];
        assert!(is_in_range(&root, child.position.open, child.position.close));
        assert!(!is_in_range(child, root.position.open, root.position.close));
    }
}
