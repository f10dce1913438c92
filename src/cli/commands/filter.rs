//! jobstats filter - Keep only listings relevant to a keyword
//!
//! All input batches are concatenated in file order before filtering.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use tracing::warn;

use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout};
use crate::error::Result;
use crate::filter::FilteredResult;
use crate::listing::{JobSummary, load_batches};

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Free-text keyword to match against titles, descriptions and companies
    #[arg(long, short = 'k')]
    pub keyword: String,

    /// Listing batch files (reads stdin when omitted)
    pub files: Vec<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &FilterArgs) -> Result<()> {
    let listings = super::concat(load_batches(&args.files)?);
    let result = ctx.engine.filter(&listings, &args.keyword);
    if result.fallback {
        warn!(keyword = %args.keyword, "no listing matched, returning unfiltered input");
    }
    output::emit_formatted(&result, ctx.output_format, render_human, render_plain)
}

fn render_human(result: &FilteredResult) -> String {
    let mut layout = HumanLayout::new();
    layout.title(&format!("Listings for '{}'", result.keyword));
    layout.kv(
        "Matched",
        &format!("{} of {}", result.filtered_count, result.original_count),
    );
    if result.fallback {
        layout.push_line(
            "No listing matched the keyword; showing unfiltered results"
                .yellow()
                .to_string(),
        );
    }
    layout.blank();
    for job in &result.results {
        let summary = JobSummary::from_listing(job);
        layout.bullet(&format!(
            "{} {} {} {}",
            summary.title.bold(),
            summary.company.cyan(),
            summary.location.city.dimmed(),
            summary.salary.displayed.green()
        ));
    }
    layout.build()
}

fn render_plain(result: &FilteredResult) -> String {
    result
        .results
        .iter()
        .map(|job| {
            let summary = JobSummary::from_listing(job);
            [
                summary.id,
                summary.title,
                summary.company,
                summary.location.city,
                summary.salary.displayed,
            ]
            .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
