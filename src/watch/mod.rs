//! Watch-list module
//!
//! A watch list declares which tags the parser materializes into tree
//! nodes; everything else in the input is skipped. The declarative,
//! versioned document form lives in `spec`, its compiled byte-sequence
//! form in `compile`.

pub mod compile;
pub mod spec;

pub use compile::{compile, CompiledTagPair, CompiledTagSet};
pub use spec::{TagKind, WatchSpec, WatchedTag, SUPPORTED_VERSION};
