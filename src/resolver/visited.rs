//! Per-call memo of already-expanded entities
//!
//! The visited set is the traversal's cycle guard: once a `(type, identity)`
//! pair is marked it is never unmarked within the same top-level call, which
//! bounds the walk to the number of distinct reachable entities. Each
//! top-level resolution call constructs its own set; instances are never
//! shared across calls.

use crate::core::identity::Identity;
use std::collections::{HashMap, HashSet};

/// Set of `(type name, identity)` pairs already expanded in this call
///
/// Cloning is cheap enough for sibling-branch snapshots: list elements at
/// the same level are resolved from the snapshot passed in, not from each
/// other's discoveries.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    seen: HashMap<String, HashSet<Identity>>,
}

impl VisitedSet {
    /// Create an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pair has already been marked
    pub fn contains(&self, type_name: &str, id: &Identity) -> bool {
        self.seen
            .get(type_name)
            .is_some_and(|ids| ids.contains(id))
    }

    /// Mark a pair; returns `false` when it was already marked
    pub fn insert(&mut self, type_name: &str, id: &Identity) -> bool {
        self.seen
            .entry(type_name.to_string())
            .or_default()
            .insert(id.clone())
    }

    /// Number of marked pairs
    pub fn len(&self) -> usize {
        self.seen.values().map(HashSet::len).sum()
    }

    /// Whether nothing has been marked yet
    pub fn is_empty(&self) -> bool {
        self.seen.values().all(HashSet::is_empty)
    }
}
