use chrono::Duration;
use proptest::prelude::*;

use jobstats::listing::JobListing;
use jobstats::test_utils::fixtures::{ListingBuilder, fixed_now};

const WORDS: &[&str] = &[
    "banca", "banco", "developer", "development", "java", "analista", "senior", "junior",
    "cuoco", "magazziniere", "data", "manager", "stage", "lead",
];

pub fn arb_text(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..=max_words).prop_map(|w| w.join(" "))
}

fn arb_salary() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        Just(None),
        Just(Some(0.0)),
        (1_000u32..150_000).prop_map(|v| Some(f64::from(v))),
    ]
}

pub fn arb_listing() -> impl Strategy<Value = JobListing> {
    (
        prop::option::of("[a-f]"),
        arb_text(4),
        arb_text(8),
        prop::option::of(prop::sample::select(&["Acme", "Beta", "Banca Uno"][..])),
        prop::option::of(prop::sample::select(&["Milano", "Roma", "Torino", " "][..])),
        (arb_salary(), arb_salary()),
        prop::option::of(-5i64..120),
        any::<bool>(),
    )
        .prop_map(
            |(id, title, description, company, city, (min, max), age, remote)| {
                let mut builder = id.map_or_else(ListingBuilder::keyless, |id| ListingBuilder::new(&id));
                builder = builder
                    .title(&title)
                    .description(&description)
                    .salary(min, max)
                    .remote(remote);
                if let Some(company) = company {
                    builder = builder.company(company);
                }
                if let Some(city) = city {
                    builder = builder.location(city);
                }
                if let Some(days) = age {
                    builder = builder.created_at(fixed_now() - Duration::days(days));
                }
                builder.build()
            },
        )
}

pub fn arb_listings(max: usize) -> impl Strategy<Value = Vec<JobListing>> {
    prop::collection::vec(arb_listing(), 0..=max)
}

pub fn arb_batches() -> impl Strategy<Value = Vec<Vec<JobListing>>> {
    prop::collection::vec(arb_listings(12), 0..4)
}
