//! Checked/indeterminate state for hierarchical key sets.
//!
//! A [`TreeIndex`] is built once per tree snapshot; check and uncheck
//! operations take the current state and return a new one, cascading
//! through the tree according to [`CheckOptions`].
//!
//! ```
//! use treecheck::{CheckOptions, CheckedState, CheckedTree, RawNode, TreeIndexBuilder};
//!
//! let index = TreeIndexBuilder::new()
//!     .build(vec![RawNode::branch("0", vec![RawNode::leaf("0-0"), RawNode::leaf("0-1")])])
//!     .unwrap();
//! let state = index
//!     .check(Some("0-0"), CheckedState::default(), &CheckOptions::default())
//!     .unwrap();
//! assert_eq!(state.checked_keys, vec!["0-0"]);
//! assert_eq!(state.indeterminate_keys, vec!["0"]);
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod util;

pub use application::{
    available_ascendant_key_set, cascade, extend_key_set, extended_checked_key_set, flatten,
    flatten_expanded, get_checked_keys, get_path, ApplicationError, ApplicationResult,
    CascadeResult, CheckRequest, CheckedTree, MergedPath, PathOptions,
};
pub use config::Settings;
pub use domain::{
    CheckOptions, CheckStrategy, CheckedState, DomainError, DomainResult, KeyDelta, NodeType,
    RawNode, TreeIndex, TreeIndexBuilder, TreeKey, TreeNode,
};
