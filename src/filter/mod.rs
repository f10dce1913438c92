//! Lexical relevance filter.
//!
//! Narrows a provider batch to listings that actually mention the query:
//!
//! 1. The keyword is normalized and split into significant tokens.
//! 2. Titles that contain an exclusion term for the keyword are rejected
//!    unless the title also contains a query token.
//! 3. A listing matches when a token occurs in its title, description or
//!    company name. For single-token queries a description/company-only
//!    match is kept only when the title carries no exclusion term.
//! 4. Source order is preserved. If nothing survives from a non-empty
//!    batch, the unfiltered batch is returned and `fallback` is set.

pub mod exclusions;
pub mod tokenizer;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::FilterConfig;
use crate::listing::JobListing;

pub use exclusions::{ExclusionTable, title_has_exclusion};
pub use tokenizer::{DEFAULT_MIN_TOKEN_CHARS, FilterQuery, normalize, tokenize};

/// Outcome of the relevance test for a single listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The query has no significant token; everything passes.
    Unconstrained,
    /// A token occurs in the title.
    TitleMatch,
    /// A token occurs only in the description or company name.
    BodyMatch,
    /// The title is about an excluded near-homonym.
    Excluded,
    /// No token occurs anywhere.
    NoMatch,
}

impl Verdict {
    #[must_use]
    pub const fn is_kept(self) -> bool {
        matches!(self, Self::Unconstrained | Self::TitleMatch | Self::BodyMatch)
    }
}

/// Listings that passed the filter, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredResult {
    pub success: bool,
    pub keyword: String,
    pub original_count: usize,
    pub filtered_count: usize,
    /// Nothing matched, so `results` is the unfiltered input.
    pub fallback: bool,
    pub results: Vec<JobListing>,
}

#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    exclusions: ExclusionTable,
    min_token_chars: usize,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(ExclusionTable::default(), DEFAULT_MIN_TOKEN_CHARS)
    }
}

impl RelevanceFilter {
    #[must_use]
    pub const fn new(exclusions: ExclusionTable, min_token_chars: usize) -> Self {
        Self {
            exclusions,
            min_token_chars,
        }
    }

    #[must_use]
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.exclusion_table(), config.min_token_chars)
    }

    #[must_use]
    pub const fn exclusions(&self) -> &ExclusionTable {
        &self.exclusions
    }

    #[must_use]
    pub fn query(&self, keyword: &str) -> FilterQuery {
        FilterQuery::new(keyword, self.min_token_chars)
    }

    /// Filter `listings` against `keyword`.
    #[must_use]
    pub fn filter(&self, listings: &[JobListing], keyword: &str) -> FilteredResult {
        let query = self.query(keyword);
        let terms = self.exclusions.terms_for(query.normalized());

        let mut results: Vec<JobListing> = listings
            .iter()
            .filter(|job| {
                let verdict = evaluate(&query, terms, job);
                trace!(key = job.resolved_key(), ?verdict, "relevance verdict");
                verdict.is_kept()
            })
            .cloned()
            .collect();

        let fallback = results.is_empty() && !listings.is_empty();
        if fallback {
            results = listings.to_vec();
        }

        debug!(
            keyword = query.normalized(),
            tokens = ?query.tokens(),
            exclusions = terms.len(),
            original = listings.len(),
            kept = results.len(),
            fallback,
            "relevance filter applied"
        );

        FilteredResult {
            success: true,
            keyword: query.raw().to_string(),
            original_count: listings.len(),
            filtered_count: results.len(),
            fallback,
            results,
        }
    }
}

/// Decide whether a listing is relevant to `query` under exclusion `terms`.
#[must_use]
pub fn evaluate(query: &FilterQuery, terms: &[String], job: &JobListing) -> Verdict {
    if query.is_unconstrained() {
        return Verdict::Unconstrained;
    }

    let title = job.title().to_lowercase();
    let description = job.description().to_lowercase();
    let company = job.company_name().unwrap_or_default().to_lowercase();

    let title_excluded = title_has_exclusion(&title, terms);
    let in_title = query.any_token_in(&title);

    if title_excluded && !in_title {
        return Verdict::Excluded;
    }

    if in_title {
        return Verdict::TitleMatch;
    }

    let in_body = query.any_token_in(&description) || query.any_token_in(&company);
    if !in_body {
        return Verdict::NoMatch;
    }

    if query.is_single_token() && title_excluded {
        return Verdict::Excluded;
    }
    Verdict::BodyMatch
}
