//! Salary aggregation over listings with a known point estimate.

use serde::{Deserialize, Serialize};

use super::ranking::percentage;
use crate::listing::JobListing;

/// A half-open salary band `[min, max)`; `max = None` is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub label: String,
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl SalaryBand {
    #[must_use]
    pub fn new(label: &str, min: f64, max: Option<f64>) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.is_none_or(|max| value < max)
    }

    /// The six bands used for Italian gross annual salaries.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("0-25k", 0.0, Some(25_000.0)),
            Self::new("25k-35k", 25_000.0, Some(35_000.0)),
            Self::new("35k-45k", 35_000.0, Some(45_000.0)),
            Self::new("45k-60k", 45_000.0, Some(60_000.0)),
            Self::new("60k-80k", 60_000.0, Some(80_000.0)),
            Self::new("80k+", 80_000.0, None),
        ]
    }
}

/// Check that bands start at zero, are contiguous and end unbounded, so
/// every positive salary lands in exactly one band.
pub fn validate_bands(bands: &[SalaryBand]) -> Result<(), String> {
    let Some(first) = bands.first() else {
        return Err("at least one salary band is required".to_string());
    };
    if first.min != 0.0 {
        return Err(format!("first salary band '{}' must start at 0", first.label));
    }
    for pair in bands.windows(2) {
        match pair[0].max {
            Some(max) if (max - pair[1].min).abs() < f64::EPSILON && max > pair[0].min => {}
            Some(_) => {
                return Err(format!(
                    "salary band '{}' must end where '{}' starts",
                    pair[0].label, pair[1].label
                ));
            }
            None => {
                return Err(format!(
                    "only the last salary band may be unbounded, not '{}'",
                    pair[0].label
                ));
            }
        }
    }
    if bands.last().and_then(|band| band.max).is_some() {
        return Err("last salary band must be unbounded".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryBucket {
    pub label: String,
    pub min: f64,
    pub max: Option<f64>,
    pub count: usize,
    /// Share of the salary-bearing listings, one decimal.
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalaryStats {
    pub avg: Option<u64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
    /// Empty when no listing carries a salary.
    pub distribution: Vec<SalaryBucket>,
}

#[derive(Debug, Clone)]
pub struct SalaryAnalyzer {
    bands: Vec<SalaryBand>,
}

impl Default for SalaryAnalyzer {
    fn default() -> Self {
        Self::new(SalaryBand::defaults())
    }
}

impl SalaryAnalyzer {
    #[must_use]
    pub const fn new(bands: Vec<SalaryBand>) -> Self {
        Self { bands }
    }

    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn analyze(&self, listings: &[JobListing]) -> SalaryStats {
        let salaries: Vec<f64> = listings.iter().filter_map(JobListing::point_salary).collect();
        if salaries.is_empty() {
            return SalaryStats::default();
        }

        let sum: f64 = salaries.iter().sum();
        let avg = (sum / salaries.len() as f64).round() as u64;
        let min = salaries.iter().copied().fold(f64::INFINITY, f64::min);
        let max = salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        SalaryStats {
            avg: Some(avg),
            min: Some(min),
            max: Some(max),
            median: median(&salaries),
            distribution: self.distribution(&salaries),
        }
    }

    fn distribution(&self, salaries: &[f64]) -> Vec<SalaryBucket> {
        self.bands
            .iter()
            .map(|band| {
                let count = salaries.iter().filter(|s| band.contains(**s)).count();
                SalaryBucket {
                    label: band.label.clone(),
                    min: band.min,
                    max: band.max,
                    count,
                    percentage: percentage(count, salaries.len()),
                }
            })
            .collect()
    }
}

/// Median of `values`; the mean of the two central values for even sizes.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
