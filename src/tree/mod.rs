//! Tree module
//!
//! The in-memory representation of matched elements (`node`), the
//! streaming state machine that builds it (`builder`), and the generic
//! walks over it (`traverse`).

pub mod builder;
pub mod node;
pub mod traverse;

pub use builder::TreeBuilder;
pub use node::{Position, ScalarValue, TreeNode};
pub use traverse::{bfs_to_level, dfs, dfs_with_leave, VisitFlow};
