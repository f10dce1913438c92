//! Coarse posting-volume trend.
//!
//! Compares the last 7 days (`recent`) with days 8 to 30 (`prior`). Rules
//! are checked in order: `growing` when `recent` exceeds the growing
//! threshold, then `declining` when it falls below the declining one,
//! otherwise `stable`. Anything between the two thresholds is stable.

use serde::{Deserialize, Serialize};

use super::timeline::TimelineStats;

pub const DEFAULT_GROWING_RATIO: f64 = 0.3;
pub const DEFAULT_DECLINING_RATIO: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Growing,
    Declining,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Above,
    Below,
}

/// `label` applies when `recent` is `comparison` to `prior * ratio`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendRule {
    pub label: Trend,
    pub comparison: Comparison,
    pub ratio: f64,
}

impl TrendRule {
    #[allow(clippy::cast_precision_loss)]
    fn applies(&self, recent: usize, prior: usize) -> bool {
        let threshold = prior as f64 * self.ratio;
        let recent = recent as f64;
        match self.comparison {
            Comparison::Above => recent > threshold,
            Comparison::Below => recent < threshold,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrendEstimator {
    rules: Vec<TrendRule>,
}

impl Default for TrendEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_GROWING_RATIO, DEFAULT_DECLINING_RATIO)
    }
}

impl TrendEstimator {
    #[must_use]
    pub fn new(growing_ratio: f64, declining_ratio: f64) -> Self {
        Self {
            rules: vec![
                TrendRule {
                    label: Trend::Growing,
                    comparison: Comparison::Above,
                    ratio: growing_ratio,
                },
                TrendRule {
                    label: Trend::Declining,
                    comparison: Comparison::Below,
                    ratio: declining_ratio,
                },
            ],
        }
    }

    #[must_use]
    pub fn rules(&self) -> &[TrendRule] {
        &self.rules
    }

    #[must_use]
    pub fn estimate(&self, timeline: &TimelineStats) -> Trend {
        let recent = timeline.last_7_days;
        let prior = timeline.last_30_days.saturating_sub(timeline.last_7_days);
        self.rules
            .iter()
            .find(|rule| rule.applies(recent, prior))
            .map_or(Trend::Stable, |rule| rule.label)
    }
}
