//! Keyword exclusion table.
//!
//! Maps a normalized keyword to substrings that mark a listing title as
//! being about a near-homonym of that keyword. A title hit is overridden
//! when the title also contains one of the query tokens.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::tokenizer::normalize;

/// Swappable lookup table `keyword -> exclusion terms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct ExclusionTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl Default for ExclusionTable {
    /// The table observed in production for Italian listings.
    fn default() -> Self {
        let mut table = Self::new();
        table.insert(
            "banca",
            [
                "banco",
                "banchista",
                "banconista",
                "addetto al banco",
                "operatore di banco",
            ],
        );
        table.insert("banco", ["banca", "bancario", "bancaria"]);
        table.insert("developer", ["development", "developing"]);
        table
    }
}

impl ExclusionTable {
    /// An empty table: nothing is ever excluded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Set the terms for `keyword`, replacing any previous entry.
    /// Keyword and terms are normalized; blank terms are dropped.
    pub fn insert<I, S>(&mut self, keyword: &str, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for term in terms {
            let term = normalize(term.as_ref());
            if !term.is_empty() && !normalized.contains(&term) {
                normalized.push(term);
            }
        }
        self.entries.insert(normalize(keyword), normalized);
    }

    /// Overlay `other` on this table; its entries win per keyword.
    pub fn extend(&mut self, other: &Self) {
        for (keyword, terms) in &other.entries {
            self.insert(keyword, terms);
        }
    }

    /// Exclusion terms for an already normalized keyword.
    #[must_use]
    pub fn terms_for(&self, normalized_keyword: &str) -> &[String] {
        self.entries
            .get(normalized_keyword)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl From<BTreeMap<String, Vec<String>>> for ExclusionTable {
    fn from(raw: BTreeMap<String, Vec<String>>) -> Self {
        let mut table = Self::new();
        for (keyword, terms) in raw {
            table.insert(&keyword, terms);
        }
        table
    }
}

impl From<ExclusionTable> for BTreeMap<String, Vec<String>> {
    fn from(table: ExclusionTable) -> Self {
        table.entries
    }
}

/// Whether any whitespace-separated word of `title` contains an exclusion
/// term. Multi-word terms therefore never fire.
#[must_use]
pub fn title_has_exclusion(title: &str, terms: &[String]) -> bool {
    if terms.is_empty() {
        return false;
    }
    title
        .split_whitespace()
        .any(|word| terms.iter().any(|term| word.contains(term.as_str())))
}
