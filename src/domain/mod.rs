//! Domain layer: tree index, entities and errors
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod node;

pub use arena::{TreeIndex, TreeIterator};
pub use builder::TreeIndexBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use node::{NodeType, RawNode, TreeKey, TreeNode};
