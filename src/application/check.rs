//! Check/uncheck entry points.
//!
//! With cascading on, the delta is expanded through the tree and the cascade
//! sweep recomputes the whole state; caller-supplied indeterminate keys are
//! discarded. With cascading off, the checked keys are a flat set and the
//! indeterminate keys are passed through.

use std::collections::HashSet;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::cascade::cascade;
use crate::application::expand::{available_ascendant_key_set, extend_key_set};
use crate::domain::{CheckOptions, CheckedState, DomainResult, KeyDelta, TreeIndex, TreeKey};

/// Input for [`get_checked_keys`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest<K> {
    pub current: CheckedState<K>,
    pub delta: KeyDelta<K>,
    pub options: CheckOptions,
}

impl<K> CheckRequest<K> {
    pub fn new(current: impl Into<CheckedState<K>>, options: CheckOptions) -> Self {
        Self {
            current: current.into(),
            delta: KeyDelta::None,
            options,
        }
    }

    pub fn with_delta(mut self, delta: KeyDelta<K>) -> Self {
        self.delta = delta;
        self
    }
}

/// Computes the next checked state for `request` over `index`.
#[instrument(
    level = "debug",
    skip_all,
    fields(cascade = request.options.cascade, strategy = %request.options.check_strategy)
)]
pub fn get_checked_keys<K: TreeKey>(
    request: CheckRequest<K>,
    index: &TreeIndex<K>,
) -> DomainResult<CheckedState<K>> {
    let CheckRequest {
        current,
        delta,
        options,
    } = request;
    let CheckedState {
        checked_keys,
        indeterminate_keys,
    } = current;

    if !options.cascade {
        let checked_keys = match delta {
            KeyDelta::None => checked_keys,
            KeyDelta::Check(keys) => checked_keys.into_iter().chain(keys).unique().collect(),
            KeyDelta::Uncheck(keys) => {
                let to_remove: HashSet<K> = keys.into_iter().collect();
                checked_keys
                    .into_iter()
                    .filter(|key| !to_remove.contains(key))
                    .unique()
                    .collect()
            }
        };
        return Ok(CheckedState {
            checked_keys,
            indeterminate_keys,
        });
    }

    let allow_not_loaded = options.allow_not_loaded;
    let (base, input_order) = match delta {
        KeyDelta::None => (
            extend_key_set(&checked_keys, index, allow_not_loaded)?,
            checked_keys,
        ),
        KeyDelta::Check(keys) => {
            let mut seeds = checked_keys;
            seeds.extend(keys);
            (extend_key_set(&seeds, index, allow_not_loaded)?, seeds)
        }
        KeyDelta::Uncheck(keys) => {
            let mut remaining = extend_key_set(&checked_keys, index, allow_not_loaded)?;
            let to_uncheck = extend_key_set(&keys, index, allow_not_loaded)?;
            let ascendants = available_ascendant_key_set(&keys, index);
            remaining.retain(|key| !to_uncheck.contains(key) && !ascendants.contains(key));
            (remaining, checked_keys)
        }
    };

    let mut result = cascade(index, base, options.check_strategy, options.leaf_only);
    if allow_not_loaded {
        // a seed above a skipped subtree is reported as checked, not partial
        result.indeterminate.retain(|key| !result.checked.contains(key));
    }
    let state = CheckedState {
        checked_keys: snapshot(index, &result.checked, &input_order),
        indeterminate_keys: snapshot(index, &result.indeterminate, &[]),
    };
    debug!(
        checked = state.checked_keys.len(),
        indeterminate = state.indeterminate_keys.len(),
        "checked state computed"
    );
    Ok(state)
}

/// Lists `set` in tree pre-order, then keys unknown to the index in the
/// order they were supplied.
fn snapshot<K: TreeKey>(index: &TreeIndex<K>, set: &HashSet<K>, input_order: &[K]) -> Vec<K> {
    let mut keys: Vec<K> = index
        .iter()
        .filter(|node| set.contains(&node.key))
        .map(|node| node.key.clone())
        .collect();
    keys.extend(
        input_order
            .iter()
            .filter(|key| set.contains(*key) && !index.contains(key))
            .unique()
            .cloned(),
    );
    keys
}

/// Checked-state operations on an indexed tree.
pub trait CheckedTree<K: TreeKey> {
    /// Recomputes `current` without applying a delta.
    fn checked_keys(
        &self,
        current: impl Into<CheckedState<K>>,
        options: &CheckOptions,
    ) -> DomainResult<CheckedState<K>>;

    /// Checks `keys` on top of `current`; an empty iterator (or `None`)
    /// recomputes `current` only.
    fn check(
        &self,
        keys: impl IntoIterator<Item = K>,
        current: impl Into<CheckedState<K>>,
        options: &CheckOptions,
    ) -> DomainResult<CheckedState<K>>;

    /// Unchecks `keys` from `current`.
    fn uncheck(
        &self,
        keys: impl IntoIterator<Item = K>,
        current: impl Into<CheckedState<K>>,
        options: &CheckOptions,
    ) -> DomainResult<CheckedState<K>>;
}

impl<K: TreeKey> CheckedTree<K> for TreeIndex<K> {
    fn checked_keys(
        &self,
        current: impl Into<CheckedState<K>>,
        options: &CheckOptions,
    ) -> DomainResult<CheckedState<K>> {
        get_checked_keys(CheckRequest::new(current, *options), self)
    }

    fn check(
        &self,
        keys: impl IntoIterator<Item = K>,
        current: impl Into<CheckedState<K>>,
        options: &CheckOptions,
    ) -> DomainResult<CheckedState<K>> {
        let request = CheckRequest::new(current, *options)
            .with_delta(KeyDelta::Check(keys.into_iter().collect()));
        get_checked_keys(request, self)
    }

    fn uncheck(
        &self,
        keys: impl IntoIterator<Item = K>,
        current: impl Into<CheckedState<K>>,
        options: &CheckOptions,
    ) -> DomainResult<CheckedState<K>> {
        let request = CheckRequest::new(current, *options)
            .with_delta(KeyDelta::Uncheck(keys.into_iter().collect()));
        get_checked_keys(request, self)
    }
}
