use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JobError, Result};
use crate::filter::{DEFAULT_MIN_TOKEN_CHARS, ExclusionTable};
use crate::stats::salary::validate_bands;
use crate::stats::trend::{DEFAULT_DECLINING_RATIO, DEFAULT_GROWING_RATIO};
use crate::stats::{DEFAULT_TOP_N, SalaryBand};

const OUTPUT_FORMATS: &[&str] = &["human", "json", "plain"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub filter: FilterConfig,
    pub stats: StatsConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Defaults, then the explicit file (or `JOBSTATS_CONFIG`) or else the
    /// global file, then environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("JOBSTATS_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                JobError::MissingConfig(format!("config file {} not found", path.display()))
            })?;
            config.merge_patch(patch);
        } else if let Some(global) = Self::load_global()? {
            config.merge_patch(global);
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Location of the per-user config file, when the platform has one.
    #[must_use]
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("jobstats/config.toml"))
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match Self::global_path() {
            Some(path) => Self::load_patch(&path),
            None => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| JobError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| JobError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.filter {
            self.filter.merge(patch);
        }
        if let Some(patch) = patch.stats {
            self.stats.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = parse_var::<usize>(&lookup, "JOBSTATS_MIN_TOKEN_CHARS")? {
            self.filter.min_token_chars = value;
        }
        if let Some(value) = parse_var::<usize>(&lookup, "JOBSTATS_TOP_N")? {
            self.stats.top_n = value;
        }
        if let Some(value) = parse_var::<f64>(&lookup, "JOBSTATS_TREND_GROWING_RATIO")? {
            self.stats.trend_growing_ratio = value;
        }
        if let Some(value) = parse_var::<f64>(&lookup, "JOBSTATS_TREND_DECLINING_RATIO")? {
            self.stats.trend_declining_ratio = value;
        }
        if let Some(value) = lookup("JOBSTATS_OUTPUT_FORMAT") {
            self.output.format = value.trim().to_lowercase();
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        validate_bands(&self.stats.salary_bands).map_err(JobError::Config)?;
        for (name, ratio) in [
            ("trend_growing_ratio", self.stats.trend_growing_ratio),
            ("trend_declining_ratio", self.stats.trend_declining_ratio),
        ] {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(JobError::Config(format!(
                    "{name} must be a non-negative number, got {ratio}"
                )));
            }
        }
        if !OUTPUT_FORMATS.contains(&self.output.format.as_str()) {
            return Err(JobError::Config(format!(
                "invalid output format {} (expected human|json|plain)",
                self.output.format
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Query words shorter than this are ignored.
    pub min_token_chars: usize,
    /// Extra exclusion entries, keyed by keyword.
    pub exclusions: BTreeMap<String, Vec<String>>,
    /// Use only `exclusions`, dropping the built-in table.
    pub replace_exclusions: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_token_chars: DEFAULT_MIN_TOKEN_CHARS,
            exclusions: BTreeMap::new(),
            replace_exclusions: false,
        }
    }
}

impl FilterConfig {
    /// The effective exclusion table: built-in entries overlaid with the
    /// configured ones, or the configured ones alone.
    #[must_use]
    pub fn exclusion_table(&self) -> ExclusionTable {
        let mut table = if self.replace_exclusions {
            ExclusionTable::new()
        } else {
            ExclusionTable::default()
        };
        table.extend(&ExclusionTable::from(self.exclusions.clone()));
        table
    }

    fn merge(&mut self, patch: FilterPatch) {
        if let Some(value) = patch.min_token_chars {
            self.min_token_chars = value;
        }
        if let Some(value) = patch.exclusions {
            self.exclusions.extend(value);
        }
        if let Some(value) = patch.replace_exclusions {
            self.replace_exclusions = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub top_n: usize,
    pub salary_bands: Vec<SalaryBand>,
    pub trend_growing_ratio: f64,
    pub trend_declining_ratio: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            salary_bands: SalaryBand::defaults(),
            trend_growing_ratio: DEFAULT_GROWING_RATIO,
            trend_declining_ratio: DEFAULT_DECLINING_RATIO,
        }
    }
}

impl StatsConfig {
    fn merge(&mut self, patch: StatsPatch) {
        if let Some(value) = patch.top_n {
            self.top_n = value;
        }
        if let Some(value) = patch.salary_bands {
            self.salary_bands = value;
        }
        if let Some(value) = patch.trend_growing_ratio {
            self.trend_growing_ratio = value;
        }
        if let Some(value) = patch.trend_declining_ratio {
            self.trend_declining_ratio = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format when `-O` is not given.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
        }
    }
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.format {
            self.format = value.trim().to_lowercase();
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub filter: Option<FilterPatch>,
    pub stats: Option<StatsPatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FilterPatch {
    pub min_token_chars: Option<usize>,
    pub exclusions: Option<BTreeMap<String, Vec<String>>>,
    pub replace_exclusions: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StatsPatch {
    pub top_n: Option<usize>,
    pub salary_bands: Option<Vec<SalaryBand>>,
    pub trend_growing_ratio: Option<f64>,
    pub trend_declining_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    pub format: Option<String>,
}

fn parse_var<T>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| JobError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}
