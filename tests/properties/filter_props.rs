use std::collections::HashSet;

use proptest::prelude::*;

use jobstats::dedup::dedupe;
use jobstats::filter::{FilterQuery, RelevanceFilter, normalize};
use jobstats::listing::JobListing;

use crate::strategies::{arb_batches, arb_listings, arb_text};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn filtered_never_exceeds_original(listings in arb_listings(20), keyword in arb_text(3)) {
        let result = RelevanceFilter::default().filter(&listings, &keyword);
        prop_assert!(result.filtered_count <= result.original_count);
        prop_assert_eq!(result.original_count, listings.len());
        prop_assert_eq!(result.filtered_count, result.results.len());
    }

    #[test]
    fn fallback_law(listings in arb_listings(20), keyword in arb_text(3)) {
        let result = RelevanceFilter::default().filter(&listings, &keyword);
        if result.fallback {
            prop_assert!(!listings.is_empty());
            prop_assert_eq!(&result.results, &listings);
        } else if !listings.is_empty() {
            prop_assert!(!result.results.is_empty());
        }
        if listings.is_empty() {
            prop_assert!(result.results.is_empty());
        }
    }

    #[test]
    fn source_order_is_preserved(listings in arb_listings(20), keyword in arb_text(2)) {
        let result = RelevanceFilter::default().filter(&listings, &keyword);
        let mut remaining = listings.iter();
        for kept in &result.results {
            prop_assert!(remaining.any(|job| job == kept), "result is not a subsequence");
        }
    }

    #[test]
    fn unconstrained_query_keeps_everything(listings in arb_listings(20)) {
        let query = FilterQuery::new("qa it", 3);
        prop_assert!(query.is_unconstrained());
        let result = RelevanceFilter::default().filter(&listings, "qa it");
        prop_assert_eq!(result.results, listings);
        prop_assert!(!result.fallback);
    }

    #[test]
    fn normalization_is_idempotent(keyword in ".{0,40}") {
        let once = normalize(&keyword);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn dedupe_is_idempotent(batches in arb_batches()) {
        let once = dedupe(&batches);
        let twice = dedupe(&[once.clone()]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn dedupe_keys_are_unique_and_complete(batches in arb_batches()) {
        let merged = dedupe(&batches);
        let mut seen = HashSet::new();
        for job in &merged {
            prop_assert!(seen.insert(job.resolved_key().to_string()), "duplicate key");
        }
        let input_keys: HashSet<String> = batches
            .iter()
            .flatten()
            .map(|job: &JobListing| job.resolved_key().to_string())
            .collect();
        prop_assert_eq!(seen, input_keys);
    }
}
