//! Counting primitive shared by every categorical breakdown.
//!
//! Groups listings by a key, counts them in first-seen order, and either
//! emits the full histogram or the top `n` groups with percentages.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::listing::JobListing;

/// One ranked group.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub count: usize,
    /// Share of the analyzed listings, one decimal.
    pub percentage: f64,
}

/// Label counts in first-seen order. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    entries: Vec<(String, usize)>,
}

impl Histogram {
    #[must_use]
    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, count)| *count)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl Serialize for Histogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in &self.entries {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

/// `count / total * 100`, rounded to one decimal. Zero when `total` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Count listings per key. Missing or blank keys count under `sentinel`.
pub fn count_by<'a, F>(listings: &'a [JobListing], key: F, sentinel: &str) -> Histogram
where
    F: Fn(&'a JobListing) -> Option<&'a str>,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(String, usize)> = Vec::new();

    for listing in listings {
        let label = key(listing)
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(sentinel);
        if let Some(&slot) = slots.get(label) {
            entries[slot].1 += 1;
        } else {
            slots.insert(label, entries.len());
            entries.push((label.to_string(), 1));
        }
    }
    Histogram { entries }
}

/// The `n` largest groups, descending by count. Ties keep first-seen order.
pub fn top_n<'a, F>(listings: &'a [JobListing], key: F, sentinel: &str, n: usize) -> Vec<RankedEntry>
where
    F: Fn(&'a JobListing) -> Option<&'a str>,
{
    let histogram = count_by(listings, key, sentinel);
    rank(histogram, listings.len(), n)
}

/// Sort a histogram descending (stable), keep `n`, attach percentages of `total`.
#[must_use]
pub fn rank(histogram: Histogram, total: usize, n: usize) -> Vec<RankedEntry> {
    let mut entries = histogram.entries;
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
        .into_iter()
        .take(n)
        .map(|(name, count)| RankedEntry {
            percentage: percentage(count, total),
            name,
            count,
        })
        .collect()
}
