use proptest::prelude::*;

use jobstats::stats::{StatisticsAggregator, TimelineStats, Trend, TrendEstimator, median};
use jobstats::test_utils::fixtures::fixed_now;

use crate::strategies::arb_listings;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn salary_distribution_is_complete(listings in arb_listings(30)) {
        let report = StatisticsAggregator::default().aggregate(&listings, fixed_now());
        let salaried = listings.iter().filter(|job| job.point_salary().is_some()).count();
        let bucketed: usize = report.salary.distribution.iter().map(|b| b.count).sum();
        prop_assert_eq!(bucketed, salaried);
        if salaried == 0 {
            prop_assert!(report.salary.distribution.is_empty());
            prop_assert!(report.salary.avg.is_none());
            prop_assert!(report.salary.median.is_none());
        }
    }

    #[test]
    fn salary_scalars_are_ordered(listings in arb_listings(30)) {
        let salary = StatisticsAggregator::default().aggregate(&listings, fixed_now()).salary;
        if let (Some(min), Some(max), Some(median)) = (salary.min, salary.max, salary.median) {
            prop_assert!(min <= median && median <= max);
        }
    }

    #[test]
    fn top_n_percentages_stay_near_hundred(listings in arb_listings(40)) {
        let report = StatisticsAggregator::default().aggregate(&listings, fixed_now());
        for ranked in [&report.locations, &report.companies] {
            prop_assert!(ranked.len() <= 10);
            let sum: f64 = ranked.iter().map(|e| e.percentage).sum();
            // each entry is rounded to one decimal, so it may overshoot by 0.05
            let slack = 0.05 * ranked.len() as f64 + 1e-9;
            prop_assert!(sum <= 100.0 + slack, "sum {sum}");
            prop_assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
        }
    }

    #[test]
    fn every_listing_gets_one_seniority_band(listings in arb_listings(30)) {
        let report = StatisticsAggregator::default().aggregate(&listings, fixed_now());
        prop_assert_eq!(report.seniority.total(), listings.len());
        prop_assert_eq!(report.total_analyzed, listings.len());
    }

    #[test]
    fn timeline_windows_are_nested(listings in arb_listings(30)) {
        let timeline = StatisticsAggregator::default().aggregate(&listings, fixed_now()).timeline;
        prop_assert!(timeline.last_7_days <= timeline.last_30_days);
        prop_assert!(timeline.last_30_days <= timeline.last_90_days);
        prop_assert!(timeline.last_90_days <= listings.len());
    }

    #[test]
    fn trend_is_total(recent in 0usize..200, prior in 0usize..200) {
        let timeline = TimelineStats::new(recent, recent + prior, recent + prior);
        let trend = TrendEstimator::default().estimate(&timeline);
        prop_assert!(matches!(trend, Trend::Growing | Trend::Declining | Trend::Stable));
        if prior == 0 && recent > 0 {
            prop_assert_eq!(trend, Trend::Growing);
        }
    }

    #[test]
    fn median_lies_between_extremes(values in prop::collection::vec(1.0f64..1e6, 1..50)) {
        let m = median(&values).unwrap();
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(lo <= m && m <= hi);
    }
}

#[test]
fn median_examples() {
    assert_eq!(median(&[20000.0, 40000.0, 60000.0]), Some(40000.0));
    assert_eq!(median(&[20000.0, 40000.0]), Some(30000.0));
    assert_eq!(median(&[]), None);
}
