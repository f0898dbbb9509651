//! Application layer: checked-state operations over a tree index
//!
//! This layer orchestrates domain logic; it never mutates the index.

pub mod cascade;
pub mod check;
pub mod error;
pub mod expand;
pub mod flatten;
pub mod path;

pub use cascade::{cascade, CascadeResult};
pub use check::{get_checked_keys, CheckRequest, CheckedTree};
pub use error::{ApplicationError, ApplicationResult};
pub use expand::{available_ascendant_key_set, extend_key_set, extended_checked_key_set};
pub use flatten::{flatten, flatten_expanded};
pub use path::{get_path, MergedPath, PathOptions};
