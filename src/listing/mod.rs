//! Provider listing model.
//!
//! [`JobListing`] mirrors the raw record shape returned by the job search
//! provider. Listings are read once and never mutated; every derived value
//! (resolved key, point salary, creation time) is computed on demand.

pub mod batch;
pub mod summary;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub use batch::{ListingBatch, SearchPage, load_batches, parse_batch};
pub use summary::{JobSummary, extract_snippet, format_salary};

/// One job advertisement as returned by the provider.
///
/// Every field is optional on the wire; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub adref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_is_predicted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_working: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Location with the provider's positional area breakdown
/// (`area[0]` city, `area[1]` region, `area[2]` country).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub area: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl JobListing {
    /// Identity used for deduplication: `id`, else `adref`, else empty.
    #[must_use]
    pub fn resolved_key(&self) -> &str {
        non_blank(self.id.as_deref())
            .or_else(|| non_blank(self.adref.as_deref()))
            .unwrap_or("")
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Company display name, else its legal name.
    #[must_use]
    pub fn company_name(&self) -> Option<&str> {
        let company = self.company.as_ref()?;
        non_blank(company.display_name.as_deref()).or_else(|| non_blank(company.name.as_deref()))
    }

    /// Location display name, else the first area entry.
    #[must_use]
    pub fn location_name(&self) -> Option<&str> {
        let location = self.location.as_ref()?;
        non_blank(location.display_name.as_deref())
            .or_else(|| non_blank(location.area.first().map(String::as_str)))
    }

    /// Positional area entry (`1` region, `2` country).
    #[must_use]
    pub fn area(&self, index: usize) -> Option<&str> {
        non_blank(
            self.location
                .as_ref()
                .and_then(|l| l.area.get(index))
                .map(String::as_str),
        )
    }

    #[must_use]
    pub fn contract_type(&self) -> Option<&str> {
        non_blank(self.contract_type.as_deref())
    }

    #[must_use]
    pub fn category_label(&self) -> Option<&str> {
        non_blank(self.category.as_ref().and_then(|c| c.label.as_deref()))
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.remote_working.unwrap_or(false)
    }

    /// Single salary estimate: mean of min and max when both are known,
    /// otherwise whichever is known. Zero bounds count as unknown and a
    /// non-positive estimate yields `None`.
    #[must_use]
    pub fn point_salary(&self) -> Option<f64> {
        let known = |v: Option<f64>| v.filter(|v| v.is_finite() && *v != 0.0);
        let estimate = match (known(self.salary_min), known(self.salary_max)) {
            (Some(min), Some(max)) => (min + max) / 2.0,
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => return None,
        };
        (estimate > 0.0).then_some(estimate)
    }

    /// Parsed creation time. Accepts RFC 3339, a naive
    /// `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or a bare date.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = non_blank(self.created.as_deref())?.trim();
        parse_timestamp(raw)
    }
}

/// Parse a provider timestamp. Returns `None` on anything unrecognised.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Integer(n) => n.to_string(),
        StringOrNumber::Float(f) => f.to_string(),
    }))
}
