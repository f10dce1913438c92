use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use tempfile::TempDir;

use crate::listing::{Category, Company, JobListing, Location};

/// Reference instant for time-dependent tests: 2024-06-01T12:00:00Z.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// Fluent constructor for [`JobListing`] values.
#[derive(Debug, Clone, Default)]
pub struct ListingBuilder {
    listing: JobListing,
}

impl ListingBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            listing: JobListing {
                id: Some(id.to_string()),
                ..Default::default()
            },
        }
    }

    /// A listing with neither `id` nor `adref`.
    pub fn keyless() -> Self {
        Self::default()
    }

    pub fn adref(mut self, adref: &str) -> Self {
        self.listing.adref = Some(adref.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.listing.title = Some(title.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.listing.description = Some(description.to_string());
        self
    }

    pub fn company(mut self, name: &str) -> Self {
        self.listing.company = Some(Company {
            display_name: Some(name.to_string()),
            name: None,
        });
        self
    }

    pub fn location(mut self, city: &str) -> Self {
        self.listing.location = Some(Location {
            display_name: Some(city.to_string()),
            area: vec!["Italia".to_string(), city.to_string()],
        });
        self
    }

    pub fn salary(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.listing.salary_min = min;
        self.listing.salary_max = max;
        self
    }

    pub fn contract(mut self, contract_type: &str) -> Self {
        self.listing.contract_type = Some(contract_type.to_string());
        self
    }

    pub fn category(mut self, label: &str) -> Self {
        self.listing.category = Some(Category {
            label: Some(label.to_string()),
        });
        self
    }

    pub fn remote(mut self, remote: bool) -> Self {
        self.listing.remote_working = Some(remote);
        self
    }

    /// Raw `created` value, kept verbatim even when unparseable.
    pub fn created(mut self, raw: &str) -> Self {
        self.listing.created = Some(raw.to_string());
        self
    }

    pub fn created_at(self, at: DateTime<Utc>) -> Self {
        let raw = at.to_rfc3339_opts(SecondsFormat::Secs, true);
        self.created(&raw)
    }

    pub fn build(self) -> JobListing {
        self.listing
    }
}

/// Isolated directory for batch files on disk.
pub struct BatchDir {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl BatchDir {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().to_path_buf();
        Self { temp_dir, path }
    }

    /// Write raw text under `name`.
    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let full_path = self.path.join(name);
        std::fs::write(&full_path, content).expect("Failed to write batch file");
        full_path
    }

    /// Write `listings` as a provider page envelope.
    pub fn write_page(&self, name: &str, count: u64, listings: &[JobListing]) -> PathBuf {
        let page = serde_json::json!({ "count": count, "results": listings });
        self.write_raw(name, &page.to_string())
    }

    /// Write `listings` as a bare JSON array.
    pub fn write_listings(&self, name: &str, listings: &[JobListing]) -> PathBuf {
        let raw = serde_json::to_string(listings).expect("Failed to encode listings");
        self.write_raw(name, &raw)
    }
}

impl Default for BatchDir {
    fn default() -> Self {
        Self::new()
    }
}
