//! Entry point tying the filter, deduplicator and aggregator together.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::dedup;
use crate::filter::{FilteredResult, RelevanceFilter};
use crate::listing::{JobListing, ListingBatch};
use crate::stats::{StatisticsAggregator, StatisticsReport};

/// Envelope returned by [`Engine::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub success: bool,
    pub keyword: String,
    /// Provider total of the first batch, else its listing count.
    pub total_jobs: u64,
    pub analyzed_jobs: usize,
    pub statistics: StatisticsReport,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    filter: RelevanceFilter,
    aggregator: StatisticsAggregator,
}

impl Engine {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            filter: RelevanceFilter::from_config(&config.filter),
            aggregator: StatisticsAggregator::from_config(&config.stats),
        }
    }

    #[must_use]
    pub fn filter(&self, listings: &[JobListing], keyword: &str) -> FilteredResult {
        self.filter.filter(listings, keyword)
    }

    #[must_use]
    pub fn dedupe<B: AsRef<[JobListing]>>(&self, batches: &[B]) -> Vec<JobListing> {
        dedup::dedupe(batches)
    }

    #[must_use]
    pub fn aggregate(&self, listings: &[JobListing], now: DateTime<Utc>) -> StatisticsReport {
        self.aggregator.aggregate(listings, now)
    }

    /// Merge `batches` and compute the statistics envelope for `keyword`.
    #[must_use]
    pub fn analyze(&self, batches: &[ListingBatch], keyword: &str, now: DateTime<Utc>) -> StatsResponse {
        let unique = self.dedupe(batches);
        let statistics = self.aggregate(&unique, now);
        let total_jobs = batches.first().map_or(0, ListingBatch::total);

        info!(
            keyword,
            batches = batches.len(),
            total_jobs,
            analyzed = unique.len(),
            "analysis complete"
        );

        StatsResponse {
            success: true,
            keyword: keyword.to_string(),
            total_jobs,
            analyzed_jobs: unique.len(),
            statistics,
        }
    }
}
