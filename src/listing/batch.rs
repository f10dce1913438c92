//! Listing batches handed over by the fetch layer.
//!
//! A batch is either the provider's page envelope (`{"count", "results"}`)
//! or a bare JSON array of listings. `-` reads from stdin.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::JobListing;
use crate::error::{JobError, Result};

/// The provider's search page envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Total hits reported by the provider for the query.
    #[serde(default)]
    pub count: Option<u64>,
    pub results: Vec<JobListing>,
}

/// One fetched batch of listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingBatch {
    pub source: String,
    /// Provider-reported total, when the batch came with an envelope.
    pub reported_count: Option<u64>,
    pub listings: Vec<JobListing>,
}

impl ListingBatch {
    #[must_use]
    pub fn new(source: impl Into<String>, listings: Vec<JobListing>) -> Self {
        Self {
            source: source.into(),
            reported_count: None,
            listings,
        }
    }

    /// Provider total when known, otherwise the number of listings held.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.reported_count
            .unwrap_or(self.listings.len() as u64)
    }
}

impl AsRef<[JobListing]> for ListingBatch {
    fn as_ref(&self) -> &[JobListing] {
        &self.listings
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BatchPayload {
    Page(SearchPage),
    Listings(Vec<JobListing>),
}

/// Parse one batch from its JSON text.
pub fn parse_batch(source: &str, raw: &str) -> Result<ListingBatch> {
    if raw.trim().is_empty() {
        return Err(JobError::InputUnreadable {
            source_name: source.to_string(),
            reason: "input is empty".to_string(),
        });
    }
    let payload: BatchPayload =
        serde_json::from_str(raw).map_err(|err| JobError::InvalidInput {
            source_name: source.to_string(),
            reason: err.to_string(),
        })?;

    let batch = match payload {
        BatchPayload::Page(page) => ListingBatch {
            source: source.to_string(),
            reported_count: page.count,
            listings: page.results,
        },
        BatchPayload::Listings(listings) => ListingBatch::new(source, listings),
    };
    debug!(
        source,
        listings = batch.listings.len(),
        reported = ?batch.reported_count,
        "parsed listing batch"
    );
    Ok(batch)
}

/// Load every batch in order. An empty path list reads a single batch
/// from stdin.
pub fn load_batches(paths: &[impl AsRef<Path>]) -> Result<Vec<ListingBatch>> {
    if paths.is_empty() {
        return Ok(vec![read_batch(Path::new("-"))?]);
    }
    paths.iter().map(|p| read_batch(p.as_ref())).collect()
}

fn read_batch(path: &Path) -> Result<ListingBatch> {
    let source = path.display().to_string();
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|err| JobError::InputUnreadable {
                source_name: source.clone(),
                reason: err.to_string(),
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|err| JobError::InputUnreadable {
            source_name: source.clone(),
            reason: err.to_string(),
        })?
    };
    parse_batch(&source, &raw)
}
