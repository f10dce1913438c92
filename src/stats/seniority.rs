//! Seniority classification by keyword taxonomy.
//!
//! Rules are evaluated in order and the first band whose keyword occurs in
//! the lowercase `title + description` wins. Junior is checked first, so a
//! listing mentioning both junior and senior terms counts as junior.

use serde::Serialize;

use crate::listing::JobListing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeniorityBand {
    Junior,
    Mid,
    Senior,
    Executive,
    Unspecified,
}

/// One band and the substrings that select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeniorityRule {
    pub band: SeniorityBand,
    pub keywords: Vec<String>,
}

impl SeniorityRule {
    #[must_use]
    pub fn new(band: SeniorityBand, keywords: &[&str]) -> Self {
        Self {
            band,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeniorityHistogram {
    pub junior: usize,
    pub mid: usize,
    pub senior: usize,
    pub executive: usize,
    pub unspecified: usize,
}

impl SeniorityHistogram {
    fn record(&mut self, band: SeniorityBand) {
        match band {
            SeniorityBand::Junior => self.junior += 1,
            SeniorityBand::Mid => self.mid += 1,
            SeniorityBand::Senior => self.senior += 1,
            SeniorityBand::Executive => self.executive += 1,
            SeniorityBand::Unspecified => self.unspecified += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.junior + self.mid + self.senior + self.executive + self.unspecified
    }
}

#[derive(Debug, Clone)]
pub struct SeniorityClassifier {
    rules: Vec<SeniorityRule>,
}

impl Default for SeniorityClassifier {
    /// Italian/English taxonomy observed in provider listings.
    fn default() -> Self {
        Self::new(vec![
            SeniorityRule::new(
                SeniorityBand::Junior,
                &[
                    "junior",
                    "jr",
                    "entry",
                    "entry level",
                    "primo impiego",
                    "neoassunto",
                    "trainee",
                    "stagista",
                ],
            ),
            SeniorityRule::new(
                SeniorityBand::Mid,
                &["mid", "middle", "intermedio", "esperto", "specialist", "specialista"],
            ),
            SeniorityRule::new(
                SeniorityBand::Senior,
                &["senior", "sr", "lead", "principle", "esperto", "specialista senior"],
            ),
            SeniorityRule::new(
                SeniorityBand::Executive,
                &[
                    "executive",
                    "manager",
                    "director",
                    "head",
                    "chief",
                    "cto",
                    "cfo",
                    "ceo",
                    "vice president",
                    "vicepresidente",
                ],
            ),
        ])
    }
}

impl SeniorityClassifier {
    #[must_use]
    pub const fn new(rules: Vec<SeniorityRule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[SeniorityRule] {
        &self.rules
    }

    #[must_use]
    pub fn classify_one(&self, job: &JobListing) -> SeniorityBand {
        let text = format!("{} {}", job.title(), job.description()).to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&text))
            .map_or(SeniorityBand::Unspecified, |rule| rule.band)
    }

    #[must_use]
    pub fn classify(&self, listings: &[JobListing]) -> SeniorityHistogram {
        let mut histogram = SeniorityHistogram::default();
        for job in listings {
            histogram.record(self.classify_one(job));
        }
        histogram
    }
}
