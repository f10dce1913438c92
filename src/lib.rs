pub mod app;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod filter;
pub mod listing;
pub mod stats;
pub mod test_utils;

pub use engine::{Engine, StatsResponse};
pub use error::{JobError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
