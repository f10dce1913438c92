//! Display view of a listing, as shown to people rather than analysed.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::JobListing;

const DEFAULT_COUNTRY: &str = "IT";
const SOURCE: &str = "Adzuna";
const SNIPPET_CHARS: usize = 200;

static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: SummaryLocation,
    pub salary: SummarySalary,
    pub snippet: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    pub category: String,
    pub contract_type: String,
    pub is_remote: bool,
    pub source: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLocation {
    pub city: String,
    pub region: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySalary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub predicted: bool,
    pub displayed: String,
}

impl JobSummary {
    #[must_use]
    pub fn from_listing(job: &JobListing) -> Self {
        let salary_min = job.salary_min.filter(|v| *v != 0.0);
        let salary_max = job.salary_max.filter(|v| *v != 0.0);
        Self {
            id: job.resolved_key().to_string(),
            title: non_empty_or(job.title(), "Titolo non disponibile"),
            company: job
                .company_name()
                .unwrap_or("Azienda non specificata")
                .to_string(),
            location: SummaryLocation {
                city: job.location_name().unwrap_or("N/A").to_string(),
                region: job.area(1).unwrap_or_default().to_string(),
                country: job.area(2).unwrap_or(DEFAULT_COUNTRY).to_string(),
            },
            salary: SummarySalary {
                min: salary_min,
                max: salary_max,
                predicted: job.salary_is_predicted.unwrap_or(false),
                displayed: format_salary(salary_min, salary_max),
            },
            snippet: extract_snippet(job.description(), SNIPPET_CHARS),
            url: job
                .redirect_url
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| "#".to_string()),
            created: job.created.clone(),
            category: job.category_label().unwrap_or("Non specificato").to_string(),
            contract_type: job.contract_type().unwrap_or("Non specificato").to_string(),
            is_remote: job.is_remote(),
            source: SOURCE,
        }
    }
}

/// Render a salary range with Italian thousands grouping.
#[must_use]
pub fn format_salary(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("€{} - €{}", group_thousands(min), group_thousands(max)),
        (Some(min), None) => format!("Da €{}", group_thousands(min)),
        (None, Some(max)) => format!("Fino a €{}", group_thousands(max)),
        (None, None) => "Non specificato".to_string(),
    }
}

/// Strip markup tags and cut to `max_chars`, appending `...` when cut.
#[must_use]
pub fn extract_snippet(description: &str, max_chars: usize) -> String {
    if description.is_empty() {
        return "Descrizione non disponibile".to_string();
    }
    let clean = MARKUP_TAG.replace_all(description, "");
    let clean = clean.trim();
    if clean.chars().count() > max_chars {
        let cut: String = clean.chars().take(max_chars).collect();
        format!("{cut}...")
    } else {
        clean.to_string()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
