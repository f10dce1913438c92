//! Property-based tests for the filter, deduplicator and aggregator.

mod filter_props;
mod stats_props;
mod strategies;
