//! Aggregator service for computing emissions statistics

use crate::types::{
    CarbontrackError, CategoryShare, CategorySummary, Record, Result, SortKey, TrendDirection,
    TrendResult,
};
use std::collections::HashMap;

/// Aggregator for category totals, orderings, shares and trends.
///
/// Every function is pure and recomputes from the full input.
pub struct Aggregator;

impl Aggregator {
    /// Aggregate records by category (blank category → "other")
    pub fn by_category(records: &[Record]) -> HashMap<String, CategorySummary> {
        let mut category_map: HashMap<String, CategorySummary> = HashMap::new();

        for record in records {
            category_map
                .entry(record.category_key().to_string())
                .or_default()
                .add(record);
        }

        category_map
    }

    /// Return a new, stably sorted copy of `records`
    pub fn sorted(records: &[Record], key: SortKey) -> Vec<Record> {
        let mut result = records.to_vec();
        match key {
            SortKey::Date => result.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at)),
            SortKey::Amount => result.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
            SortKey::Category => result.sort_by(|a, b| a.category_key().cmp(b.category_key())),
        }
        result
    }

    /// `part` as a percentage of `whole`; 0 when `whole` is not positive
    /// or the ratio is not a finite number
    pub fn percentage_of_total(part: f64, whole: f64) -> f64 {
        if whole > 0.0 {
            let percentage = (part / whole) * 100.0;
            if percentage.is_finite() {
                return percentage;
            }
        }
        0.0
    }

    /// Share of the overall total per category, largest first (ties by name)
    pub fn shares(summaries: &HashMap<String, CategorySummary>) -> Vec<CategoryShare> {
        let overall: f64 = summaries.values().map(|s| s.total_amount).sum();

        let mut result: Vec<CategoryShare> = summaries
            .iter()
            .map(|(category, summary)| CategoryShare {
                category: category.clone(),
                total_amount: summary.total_amount,
                percentage: Self::percentage_of_total(summary.total_amount, overall),
            })
            .collect();

        result.sort_by(|a, b| {
            b.total_amount
                .total_cmp(&a.total_amount)
                .then_with(|| a.category.cmp(&b.category))
        });
        result
    }

    /// Period-over-period change. A tie counts as a decrease.
    pub fn trend(current: f64, previous: f64) -> Result<TrendResult> {
        if !current.is_finite() || !previous.is_finite() {
            return Err(CarbontrackError::DivisionByZero(format!(
                "period totals must be finite (current {}, previous {})",
                current, previous
            )));
        }
        if previous == 0.0 {
            return Err(CarbontrackError::DivisionByZero(
                "previous period total is zero".into(),
            ));
        }

        let change = (current - previous) / previous;
        if !change.is_finite() {
            return Err(CarbontrackError::DivisionByZero(format!(
                "previous period total {} is too small to compare against",
                previous
            )));
        }
        let direction = if current > previous {
            TrendDirection::Increase
        } else {
            TrendDirection::Decrease
        };

        Ok(TrendResult {
            percentage_change: change.abs() * 100.0,
            direction,
        })
    }

    /// Sum of record amounts
    pub fn total(records: &[Record]) -> f64 {
        records.iter().map(|r| r.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_record(category: &str, amount: f64, day: u32) -> Record {
        Record {
            category: category.into(),
            amount,
            secondary_amount: 0.0,
            occurred_at: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            activity: Some(format!("{}-{}", category, day)),
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            make_record("transport", 45.2, 8),
            make_record("food", 12.5, 12),
            make_record("travel", 180.5, 3),
            make_record("food", 5.0, 15),
            make_record("Utilities", 45.2, 1),
            make_record("shopping", 8.3, 20),
        ]
    }

    // ========== by_category() tests ==========

    #[test]
    fn test_by_category_empty() {
        let result = Aggregator::by_category(&[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_by_category_food_travel_scenario() {
        let records = vec![
            make_record("food", 12.5, 1),
            make_record("travel", 180.5, 2),
            make_record("food", 5.0, 3),
        ];

        let result = Aggregator::by_category(&records);

        assert_eq!(result.len(), 2);
        let food = result.get("food").unwrap();
        assert!((food.total_amount - 17.5).abs() < 1e-9);
        assert_eq!(food.count, 2);
        let travel = result.get("travel").unwrap();
        assert!((travel.total_amount - 180.5).abs() < 1e-9);
        assert_eq!(travel.count, 1);
    }

    #[test]
    fn test_by_category_blank_category_becomes_other() {
        let records = vec![make_record("", 3.0, 1), make_record("other", 2.0, 2)];

        let result = Aggregator::by_category(&records);

        assert_eq!(result.len(), 1);
        let other = result.get("other").unwrap();
        assert_eq!(other.count, 2);
        assert!((other.total_amount - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_by_category_secondary_totals() {
        let mut with_spend = make_record("food", 12.5, 1);
        with_spend.secondary_amount = 450.0;
        let records = vec![with_spend, make_record("food", 5.0, 2)];

        let result = Aggregator::by_category(&records);

        assert!((result["food"].total_secondary - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_by_category_totals_match_input_sum() {
        let records = sample();
        let result = Aggregator::by_category(&records);

        let bucket_sum: f64 = result.values().map(|s| s.total_amount).sum();
        let count_sum: u64 = result.values().map(|s| s.count).sum();
        assert!((bucket_sum - Aggregator::total(&records)).abs() < 1e-9);
        assert_eq!(count_sum, records.len() as u64);
    }

    #[test]
    fn test_by_category_monotonic() {
        let mut records = sample();
        let before = Aggregator::by_category(&records)["food"].total_amount;
        records.push(make_record("food", 0.0, 28));
        records.push(make_record("food", 1.5, 29));
        let after = Aggregator::by_category(&records)["food"].total_amount;
        assert!(after >= before);
    }

    // ========== sorted() tests ==========

    #[test]
    fn test_sorted_empty() {
        assert!(Aggregator::sorted(&[], SortKey::Date).is_empty());
        assert!(Aggregator::sorted(&[], SortKey::Amount).is_empty());
    }

    #[test]
    fn test_sorted_by_date_most_recent_first() {
        let result = Aggregator::sorted(&sample(), SortKey::Date);
        let days: Vec<u32> = result
            .iter()
            .map(|r| chrono::Datelike::day(&r.occurred_at))
            .collect();
        assert_eq!(days, vec![20, 15, 12, 8, 3, 1]);
    }

    #[test]
    fn test_sorted_by_amount_is_stable_for_ties() {
        let result = Aggregator::sorted(&sample(), SortKey::Amount);
        let names: Vec<&str> = result.iter().map(|r| r.category.as_str()).collect();
        // transport and Utilities tie at 45.2; input order kept
        assert_eq!(
            names,
            vec!["travel", "transport", "Utilities", "food", "shopping", "food"]
        );
    }

    #[test]
    fn test_sorted_by_category_ordinal_and_stable() {
        let result = Aggregator::sorted(&sample(), SortKey::Category);
        let labels: Vec<String> = result
            .iter()
            .map(|r| r.activity.clone().unwrap())
            .collect();
        // Uppercase sorts before lowercase; the two food records keep input order
        assert_eq!(
            labels,
            vec![
                "Utilities-1",
                "food-12",
                "food-15",
                "shopping-20",
                "transport-8",
                "travel-3"
            ]
        );
    }

    #[test]
    fn test_sorted_does_not_mutate_input() {
        let records = sample();
        let snapshot = records.clone();
        let _ = Aggregator::sorted(&records, SortKey::Amount);
        assert_eq!(records, snapshot);
    }

    #[test]
    fn test_sorted_is_permutation_and_idempotent() {
        let records = sample();
        for key in [SortKey::Date, SortKey::Amount, SortKey::Category] {
            let once = Aggregator::sorted(&records, key);
            assert_eq!(once.len(), records.len());
            for record in &records {
                let in_input = records.iter().filter(|r| *r == record).count();
                let in_output = once.iter().filter(|r| *r == record).count();
                assert_eq!(in_input, in_output);
            }
            let twice = Aggregator::sorted(&once, key);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_sorted_by_date_reversed_is_ascending() {
        let records = sample();
        let mut descending = Aggregator::sorted(&records, SortKey::Date);
        descending.reverse();

        let mut ascending = records.clone();
        ascending.sort_by_key(|r| r.occurred_at);

        assert_eq!(descending, ascending);
    }

    // ========== percentage_of_total() tests ==========

    #[test]
    fn test_percentage_of_total() {
        assert_eq!(Aggregator::percentage_of_total(0.0, 100.0), 0.0);
        assert_eq!(Aggregator::percentage_of_total(25.0, 100.0), 25.0);
    }

    #[test]
    fn test_percentage_of_total_zero_whole_falls_back() {
        assert_eq!(Aggregator::percentage_of_total(50.0, 0.0), 0.0);
        assert_eq!(Aggregator::percentage_of_total(50.0, -10.0), 0.0);
    }

    #[test]
    fn test_percentage_of_total_never_non_finite() {
        assert_eq!(Aggregator::percentage_of_total(1.0, 1e-310), 0.0);
        assert_eq!(Aggregator::percentage_of_total(f64::NAN, 100.0), 0.0);
        assert_eq!(Aggregator::percentage_of_total(1.0, f64::NAN), 0.0);
        assert_eq!(Aggregator::percentage_of_total(1.0, f64::INFINITY), 0.0);
        assert_eq!(Aggregator::percentage_of_total(f64::INFINITY, 100.0), 0.0);
    }

    // ========== shares() tests ==========

    #[test]
    fn test_shares_sum_to_hundred() {
        let summaries = Aggregator::by_category(&sample());
        let shares = Aggregator::shares(&summaries);

        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!(shares.iter().all(|s| s.percentage >= 0.0));
    }

    #[test]
    fn test_shares_ordered_largest_first() {
        let summaries = Aggregator::by_category(&sample());
        let shares = Aggregator::shares(&summaries);

        assert_eq!(shares[0].category, "travel");
        // transport and Utilities tie at 45.2; name order breaks it
        assert_eq!(shares[1].category, "Utilities");
        assert_eq!(shares[2].category, "transport");
    }

    #[test]
    fn test_shares_all_zero_totals() {
        let summaries = Aggregator::by_category(&[make_record("food", 0.0, 1)]);
        let shares = Aggregator::shares(&summaries);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].percentage, 0.0);
    }

    // ========== trend() tests ==========

    #[test]
    fn test_trend_increase() {
        let trend = Aggregator::trend(120.0, 100.0).unwrap();
        assert_eq!(trend.direction, TrendDirection::Increase);
        assert!((trend.percentage_change - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_decrease() {
        let trend = Aggregator::trend(240.0, 300.0).unwrap();
        assert_eq!(trend.direction, TrendDirection::Decrease);
        assert!((trend.percentage_change - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_tie_is_decrease() {
        let trend = Aggregator::trend(100.0, 100.0).unwrap();
        assert_eq!(trend.direction, TrendDirection::Decrease);
        assert_eq!(trend.percentage_change, 0.0);
    }

    #[test]
    fn test_trend_zero_previous_is_error() {
        let result = Aggregator::trend(50.0, 0.0);
        assert!(matches!(result, Err(CarbontrackError::DivisionByZero(_))));
    }

    #[test]
    fn test_trend_tiny_previous_is_error() {
        let result = Aggregator::trend(1.0, 1e-310);
        assert!(matches!(result, Err(CarbontrackError::DivisionByZero(_))));
    }

    #[test]
    fn test_trend_non_finite_inputs_are_errors() {
        for (current, previous) in [
            (f64::NAN, 100.0),
            (100.0, f64::NAN),
            (f64::INFINITY, 100.0),
            (100.0, f64::NEG_INFINITY),
        ] {
            let result = Aggregator::trend(current, previous);
            assert!(
                matches!(result, Err(CarbontrackError::DivisionByZero(_))),
                "trend({}, {}) should fail",
                current,
                previous
            );
        }
    }
}
