//! Domain entities: checked state, deltas and options

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which granularity of node ends up in the checked output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStrategy {
    /// Every contributing node
    #[default]
    All,
    /// Only the highest ancestor of a fully checked subtree
    Parent,
    /// Only leaf-granularity results
    Child,
}

impl fmt::Display for CheckStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckStrategy::All => "all",
            CheckStrategy::Parent => "parent",
            CheckStrategy::Child => "child",
        };
        f.write_str(name)
    }
}

impl FromStr for CheckStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(CheckStrategy::All),
            "parent" => Ok(CheckStrategy::Parent),
            "child" => Ok(CheckStrategy::Child),
            other => Err(format!("unknown check strategy: {other}")),
        }
    }
}

/// Options for checked-state computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOptions {
    /// Propagate checked state between nodes
    pub cascade: bool,
    /// Restrict output to leaf keys
    pub leaf_only: bool,
    pub check_strategy: CheckStrategy,
    /// Skip not-loaded subtrees instead of failing
    pub allow_not_loaded: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            cascade: true,
            leaf_only: false,
            check_strategy: CheckStrategy::All,
            allow_not_loaded: false,
        }
    }
}

impl CheckOptions {
    pub fn with_cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn with_leaf_only(mut self, leaf_only: bool) -> Self {
        self.leaf_only = leaf_only;
        self
    }

    pub fn with_strategy(mut self, check_strategy: CheckStrategy) -> Self {
        self.check_strategy = check_strategy;
        self
    }

    pub fn with_allow_not_loaded(mut self, allow_not_loaded: bool) -> Self {
        self.allow_not_loaded = allow_not_loaded;
        self
    }
}

/// Checked and indeterminate keys; the two lists are disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckedState<K> {
    pub checked_keys: Vec<K>,
    pub indeterminate_keys: Vec<K>,
}

impl<K> Default for CheckedState<K> {
    fn default() -> Self {
        Self {
            checked_keys: Vec::new(),
            indeterminate_keys: Vec::new(),
        }
    }
}

impl<K> CheckedState<K> {
    pub fn new(checked_keys: Vec<K>, indeterminate_keys: Vec<K>) -> Self {
        Self {
            checked_keys,
            indeterminate_keys,
        }
    }
}

/// A bare key list is a state without indeterminate keys.
impl<K> From<Vec<K>> for CheckedState<K> {
    fn from(checked_keys: Vec<K>) -> Self {
        Self {
            checked_keys,
            indeterminate_keys: Vec::new(),
        }
    }
}

impl<K: Clone> From<&[K]> for CheckedState<K> {
    fn from(checked_keys: &[K]) -> Self {
        Self::from(checked_keys.to_vec())
    }
}

/// Keys to apply on top of the current state; checking and unchecking are
/// mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyDelta<K> {
    /// Recompute the current state only
    #[default]
    None,
    Check(Vec<K>),
    Uncheck(Vec<K>),
}
