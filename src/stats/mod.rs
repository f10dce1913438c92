//! Market statistics over a deduplicated listing set.
//!
//! [`StatisticsAggregator`] runs the salary, timeline, ranking, seniority
//! and trend analyzers and assembles a [`StatisticsReport`]. Every
//! percentage is relative to the number of analyzed listings, except the
//! salary distribution which is relative to the salary-bearing subset.

pub mod ranking;
pub mod salary;
pub mod seniority;
pub mod timeline;
pub mod trend;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::StatsConfig;
use crate::listing::JobListing;

pub use ranking::{Histogram, RankedEntry, count_by, percentage, rank, top_n};
pub use salary::{SalaryAnalyzer, SalaryBand, SalaryBucket, SalaryStats, median};
pub use seniority::{SeniorityBand, SeniorityClassifier, SeniorityHistogram, SeniorityRule};
pub use timeline::TimelineStats;
pub use trend::{Trend, TrendEstimator};

/// Label for listings without a location or company.
pub const MISSING_PLACE: &str = "N/A";
/// Label for listings without a contract type or category.
pub const MISSING_LABEL: &str = "Non specificato";
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub salary: SalaryStats,
    pub timeline: TimelineStats,
    pub locations: Vec<RankedEntry>,
    pub companies: Vec<RankedEntry>,
    pub contract_types: Histogram,
    pub remote_jobs: usize,
    pub remote_percentage: f64,
    pub seniority: SeniorityHistogram,
    pub categories: Histogram,
    pub trend: Trend,
    pub total_analyzed: usize,
}

impl StatisticsReport {
    /// Report for an empty listing set: nulls, zeros and empty collections.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            salary: SalaryStats::default(),
            timeline: TimelineStats::default(),
            locations: Vec::new(),
            companies: Vec::new(),
            contract_types: Histogram::default(),
            remote_jobs: 0,
            remote_percentage: 0.0,
            seniority: SeniorityHistogram::default(),
            categories: Histogram::default(),
            trend: Trend::Stable,
            total_analyzed: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatisticsAggregator {
    salary: SalaryAnalyzer,
    seniority: SeniorityClassifier,
    trend: TrendEstimator,
    top_n: usize,
}

impl Default for StatisticsAggregator {
    fn default() -> Self {
        Self::new(
            SalaryAnalyzer::default(),
            SeniorityClassifier::default(),
            TrendEstimator::default(),
            DEFAULT_TOP_N,
        )
    }
}

impl StatisticsAggregator {
    #[must_use]
    pub const fn new(
        salary: SalaryAnalyzer,
        seniority: SeniorityClassifier,
        trend: TrendEstimator,
        top_n: usize,
    ) -> Self {
        Self {
            salary,
            seniority,
            trend,
            top_n,
        }
    }

    #[must_use]
    pub fn from_config(config: &StatsConfig) -> Self {
        Self::new(
            SalaryAnalyzer::new(config.salary_bands.clone()),
            SeniorityClassifier::default(),
            TrendEstimator::new(config.trend_growing_ratio, config.trend_declining_ratio),
            config.top_n,
        )
    }

    /// Build the report for `listings` as of `now`.
    #[must_use]
    pub fn aggregate(&self, listings: &[JobListing], now: DateTime<Utc>) -> StatisticsReport {
        if listings.is_empty() {
            debug!("no listings to analyze");
            return StatisticsReport::empty();
        }

        let total = listings.len();
        let timeline = timeline::analyze(listings, now);
        let trend = self.trend.estimate(&timeline);
        let remote_jobs = listings.iter().filter(|job| job.is_remote()).count();

        let report = StatisticsReport {
            salary: self.salary.analyze(listings),
            timeline,
            locations: top_n(listings, JobListing::location_name, MISSING_PLACE, self.top_n),
            companies: top_n(listings, JobListing::company_name, MISSING_PLACE, self.top_n),
            contract_types: count_by(listings, JobListing::contract_type, MISSING_LABEL),
            remote_jobs,
            remote_percentage: percentage(remote_jobs, total),
            seniority: self.seniority.classify(listings),
            categories: count_by(listings, JobListing::category_label, MISSING_LABEL),
            trend,
            total_analyzed: total,
        };

        debug!(
            total,
            salaried = report.salary.distribution.iter().map(|b| b.count).sum::<usize>(),
            last7 = timeline.last_7_days,
            ?trend,
            "aggregated listing statistics"
        );
        report
    }
}
