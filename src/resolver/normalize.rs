//! Output normalization
//!
//! The recursive traversal can surface the same entity through several
//! paths. Normalization deduplicates by `(type, raw identity)` keeping the
//! first occurrence, then applies a final whitelist pass. The resolver
//! should never produce an off-whitelist record in the first place; the
//! final pass enforces the invariant anyway.

use crate::core::identity::Identity;
use crate::render::LinkRecord;
use crate::resolver::whitelist::Whitelist;
use std::collections::HashSet;

/// Deduplicate and whitelist-filter resolved records, preserving order
pub fn normalize(records: Vec<LinkRecord>, whitelist: &Whitelist) -> Vec<LinkRecord> {
    if whitelist.excludes_everything() {
        return Vec::new();
    }

    let mut seen: HashSet<(String, crate::core::identity::Identity)> = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert((record.entity_type.clone(), record.raw_identity.clone())))
        .filter(|record| whitelist.allows(&record.entity_type))
        .collect()
}
