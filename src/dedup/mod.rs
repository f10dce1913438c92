//! Batch deduplication.
//!
//! Merges several provider batches (typically the same query sorted by
//! date and by salary) into one set keyed by listing identity.
//!
//! ## Strategy
//!
//! 1. **Key**: `id`, falling back to `adref`. Listings with neither share
//!    the empty key and collapse into one.
//! 2. **Conflicts**: the last occurrence wins, so later batches overwrite
//!    earlier ones.
//! 3. **Order**: output follows the order in which keys were first seen.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::listing::JobListing;

/// Counters describing a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DedupStats {
    /// Listings across all batches before merging.
    pub seen: usize,
    /// Distinct keys kept.
    pub unique: usize,
    /// Occurrences that overwrote an earlier listing.
    pub replaced: usize,
    /// Listings that had neither `id` nor `adref`.
    pub keyless: usize,
}

/// Merge `batches` into unique listings. See module docs for the rules.
#[must_use]
pub fn dedupe<B>(batches: &[B]) -> Vec<JobListing>
where
    B: AsRef<[JobListing]>,
{
    dedupe_with_stats(batches).0
}

/// [`dedupe`] plus merge counters.
#[must_use]
pub fn dedupe_with_stats<B>(batches: &[B]) -> (Vec<JobListing>, DedupStats)
where
    B: AsRef<[JobListing]>,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut unique: Vec<JobListing> = Vec::new();
    let mut stats = DedupStats::default();

    for listing in batches.iter().flat_map(|batch| batch.as_ref()) {
        stats.seen += 1;
        let key = listing.resolved_key();
        if key.is_empty() {
            stats.keyless += 1;
        }
        if let Some(&slot) = slots.get(key) {
            unique[slot] = listing.clone();
            stats.replaced += 1;
        } else {
            slots.insert(key, unique.len());
            unique.push(listing.clone());
        }
    }
    stats.unique = unique.len();

    debug!(
        batches = batches.len(),
        seen = stats.seen,
        unique = stats.unique,
        replaced = stats.replaced,
        keyless = stats.keyless,
        "deduplicated listing batches"
    );
    (unique, stats)
}
