//! Posting recency windows.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::listing::JobListing;

/// Listing counts inside three overlapping windows ending at `now`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimelineStats {
    #[serde(rename = "last7days")]
    pub last_7_days: usize,
    #[serde(rename = "last30days")]
    pub last_30_days: usize,
    #[serde(rename = "last90days")]
    pub last_90_days: usize,
}

impl TimelineStats {
    #[must_use]
    pub const fn new(last_7_days: usize, last_30_days: usize, last_90_days: usize) -> Self {
        Self {
            last_7_days,
            last_30_days,
            last_90_days,
        }
    }
}

/// Count listings created at or after each window start. Listings without
/// a parseable creation time are taken as created at `now`.
#[must_use]
pub fn analyze(listings: &[JobListing], now: DateTime<Utc>) -> TimelineStats {
    let since_7 = now - Duration::days(7);
    let since_30 = now - Duration::days(30);
    let since_90 = now - Duration::days(90);

    listings
        .iter()
        .map(|job| job.created_at().unwrap_or(now))
        .fold(TimelineStats::default(), |mut acc, created| {
            if created >= since_7 {
                acc.last_7_days += 1;
            }
            if created >= since_30 {
                acc.last_30_days += 1;
            }
            if created >= since_90 {
                acc.last_90_days += 1;
            }
            acc
        })
}
