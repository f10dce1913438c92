//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;
use crate::listing::{JobListing, ListingBatch};

pub mod config;
pub mod dedup;
pub mod filter;
pub mod stats;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Filter(args) => filter::run(ctx, args),
        Commands::Stats(args) => stats::run(ctx, args),
        Commands::Dedup(args) => dedup::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
    }
}

/// Concatenate batches into one listing sequence, keeping file order.
fn concat(batches: Vec<ListingBatch>) -> Vec<JobListing> {
    batches
        .into_iter()
        .flat_map(|batch| batch.listings)
        .collect()
}

/// Render an optional value, or `-` when absent.
fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
