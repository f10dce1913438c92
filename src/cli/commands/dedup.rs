//! jobstats dedup - Merge batches into unique listings
//!
//! Later files overwrite earlier ones for the same listing key.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::OutputFormat;
use crate::cli::output::{self, HumanLayout};
use crate::dedup::{DedupStats, dedupe_with_stats};
use crate::error::Result;
use crate::listing::{JobListing, JobSummary, load_batches};

#[derive(Args, Debug)]
pub struct DedupArgs {
    /// Listing batch files (reads stdin when omitted)
    pub files: Vec<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &DedupArgs) -> Result<()> {
    let batches = load_batches(&args.files)?;
    let (unique, stats) = dedupe_with_stats(&batches);
    match ctx.output_format {
        OutputFormat::Json => output::emit_json(&unique),
        OutputFormat::Human => {
            println!("{}", render_human(&unique, &stats));
            Ok(())
        }
        OutputFormat::Plain => {
            println!("{}", render_plain(&unique));
            Ok(())
        }
    }
}

fn render_human(unique: &[JobListing], stats: &DedupStats) -> String {
    let mut layout = HumanLayout::new();
    layout.title("Merged listings");
    layout.kv("Seen", &stats.seen.to_string());
    layout.kv("Unique", &stats.unique.to_string());
    layout.kv("Replaced", &stats.replaced.to_string());
    if stats.keyless > 0 {
        layout.push_line(
            format!("{} listings had no id or adref and share one key", stats.keyless)
                .yellow()
                .to_string(),
        );
    }
    layout.blank();
    for job in unique {
        let summary = JobSummary::from_listing(job);
        layout.bullet(&format!("{} {}", summary.id.dimmed(), summary.title));
    }
    layout.build()
}

fn render_plain(unique: &[JobListing]) -> String {
    unique
        .iter()
        .map(|job| format!("{}\t{}", job.resolved_key(), job.title()))
        .collect::<Vec<_>>()
        .join("\n")
}
