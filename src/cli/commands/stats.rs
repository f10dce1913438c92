//! jobstats stats - Merge batches and compute market statistics
//!
//! Each input file is one batch, typically the same search sorted by date
//! and by salary. Batches are deduplicated before aggregation.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;

use super::or_dash;
use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout};
use crate::engine::StatsResponse;
use crate::error::{JobError, Result};
use crate::listing::{load_batches, parse_timestamp};
use crate::stats::{Histogram, RankedEntry, Trend};

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Keyword the batches were fetched for (echoed in the report)
    #[arg(long, short = 'k', default_value = "")]
    pub keyword: String,

    /// Reference time for the timeline windows (RFC 3339, default: now)
    #[arg(long)]
    pub now: Option<String>,

    /// Listing batch files (reads stdin when omitted)
    pub files: Vec<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &StatsArgs) -> Result<()> {
    let now = resolve_now(args.now.as_deref())?;
    let batches = load_batches(&args.files)?;
    let response = ctx.engine.analyze(&batches, &args.keyword, now);
    output::emit_formatted(&response, ctx.output_format, render_human, render_plain)
}

fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => {
            parse_timestamp(raw.trim()).ok_or_else(|| JobError::InvalidTimestamp(raw.to_string()))
        }
        None => Ok(Utc::now()),
    }
}

fn render_human(response: &StatsResponse) -> String {
    let stats = &response.statistics;
    let mut layout = HumanLayout::new();

    let heading = if response.keyword.is_empty() {
        "Market statistics".to_string()
    } else {
        format!("Market statistics for '{}'", response.keyword)
    };
    layout.title(&heading);
    layout.kv("Provider total", &response.total_jobs.to_string());
    layout.kv("Analyzed", &response.analyzed_jobs.to_string());
    layout.kv("Trend", &trend_label(stats.trend));
    layout.kv(
        "Remote",
        &format!("{} ({}%)", stats.remote_jobs, stats.remote_percentage),
    );
    layout.blank();

    layout.section("Salary");
    layout.kv("Average", &or_dash(stats.salary.avg));
    layout.kv("Median", &or_dash(stats.salary.median));
    layout.kv("Min", &or_dash(stats.salary.min));
    layout.kv("Max", &or_dash(stats.salary.max));
    for bucket in &stats.salary.distribution {
        layout.kv(
            &format!("  {}", bucket.label),
            &format!("{} ({}%)", bucket.count, bucket.percentage),
        );
    }
    layout.blank();

    layout.section("Timeline");
    layout.kv("Last 7 days", &stats.timeline.last_7_days.to_string());
    layout.kv("Last 30 days", &stats.timeline.last_30_days.to_string());
    layout.kv("Last 90 days", &stats.timeline.last_90_days.to_string());
    layout.blank();

    layout.section("Seniority");
    let seniority = &stats.seniority;
    for (label, count) in [
        ("Junior", seniority.junior),
        ("Mid", seniority.mid),
        ("Senior", seniority.senior),
        ("Executive", seniority.executive),
        ("Unspecified", seniority.unspecified),
    ] {
        layout.kv(label, &count.to_string());
    }
    layout.blank();

    ranked_section(&mut layout, "Top locations", &stats.locations);
    ranked_section(&mut layout, "Top companies", &stats.companies);
    histogram_section(&mut layout, "Contract types", &stats.contract_types);
    histogram_section(&mut layout, "Categories", &stats.categories);

    layout.build()
}

fn ranked_section(layout: &mut HumanLayout, title: &str, entries: &[RankedEntry]) {
    layout.section(title);
    for entry in entries {
        layout.kv(&entry.name, &format!("{} ({}%)", entry.count, entry.percentage));
    }
    layout.blank();
}

fn histogram_section(layout: &mut HumanLayout, title: &str, histogram: &Histogram) {
    layout.section(title);
    for (label, count) in histogram.iter() {
        layout.kv(label, &count.to_string());
    }
    layout.blank();
}

fn trend_label(trend: Trend) -> String {
    match trend {
        Trend::Growing => "growing".green().to_string(),
        Trend::Declining => "declining".red().to_string(),
        Trend::Stable => "stable".yellow().to_string(),
    }
}

fn render_plain(response: &StatsResponse) -> String {
    let stats = &response.statistics;
    let trend = match stats.trend {
        Trend::Growing => "growing",
        Trend::Declining => "declining",
        Trend::Stable => "stable",
    };
    let rows: Vec<(&str, String)> = vec![
        ("keyword", response.keyword.clone()),
        ("total_jobs", response.total_jobs.to_string()),
        ("analyzed_jobs", response.analyzed_jobs.to_string()),
        ("salary_avg", or_dash(stats.salary.avg)),
        ("salary_median", or_dash(stats.salary.median)),
        ("salary_min", or_dash(stats.salary.min)),
        ("salary_max", or_dash(stats.salary.max)),
        ("last_7_days", stats.timeline.last_7_days.to_string()),
        ("last_30_days", stats.timeline.last_30_days.to_string()),
        ("last_90_days", stats.timeline.last_90_days.to_string()),
        ("remote_jobs", stats.remote_jobs.to_string()),
        ("remote_percentage", stats.remote_percentage.to_string()),
        ("trend", trend.to_string()),
    ];
    rows.into_iter()
        .map(|(key, value)| format!("{key}\t{value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::listing::ListingBatch;
    use crate::test_utils::fixtures::{ListingBuilder, fixed_now};

    fn response() -> StatsResponse {
        let batch = ListingBatch::new(
            "by_date",
            vec![
                ListingBuilder::new("1")
                    .title("Senior Analyst")
                    .location("Torino")
                    .salary(Some(50000.0), None)
                    .created_at(fixed_now())
                    .build(),
            ],
        );
        Engine::default().analyze(&[batch], "analyst", fixed_now())
    }

    #[test]
    fn resolve_now_parses_rfc3339() {
        let now = resolve_now(Some("2024-06-01T12:00:00Z")).unwrap();
        assert_eq!(now, fixed_now());
    }

    #[test]
    fn resolve_now_rejects_garbage() {
        let err = resolve_now(Some("yesterday")).unwrap_err();
        assert!(matches!(err, JobError::InvalidTimestamp(ref v) if v == "yesterday"));
    }

    #[test]
    fn plain_output_rows() {
        let text = render_plain(&response());
        assert!(text.contains("keyword\tanalyst"));
        assert!(text.contains("salary_avg\t50000"));
        assert!(text.contains("last_7_days\t1"));
        assert!(text.contains("trend\tgrowing"));
    }

    #[test]
    fn human_output_sections() {
        colored::control::set_override(false);
        let text = render_human(&response());
        for needle in ["Market statistics for 'analyst'", "Salary", "Timeline", "Torino", "Senior"] {
            assert!(text.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn human_output_for_empty_report() {
        colored::control::set_override(false);
        let empty = Engine::default().analyze(&[], "", fixed_now());
        let text = render_human(&empty);
        assert!(text.starts_with("Market statistics\n"));
        assert!(text.contains("stable"));
    }
}
