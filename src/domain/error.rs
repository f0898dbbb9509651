//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors raised while building an index or computing checked state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Expansion reached a node with unknown subtree extent; load it and retry.
    #[error("checking a subtree whose required nodes are not fully loaded")]
    SubtreeNotLoaded,

    #[error("duplicate key in tree: {0}")]
    DuplicateKey(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
