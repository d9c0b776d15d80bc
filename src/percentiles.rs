//! # Percentile Ladder
//!
//! Percentile estimates over the frequency counts (not over the rows themselves).
//!
//! Two different rank rules live here and both are intentional:
//!
//! * [`PercentileLadder::estimate`] interpolates linearly between the two ranks
//!   surrounding `(p / 100) * (n - 1)`.
//! * [`PercentileLadder::floored_rank_value`] truncates that same index and
//!   returns the count at the lower rank with no interpolation. The export
//!   threshold uses this rule.

use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::frequency::FrequencyTable;

/// The percentiles reported in the summary: 10th, 20th, ... 100th.
pub const REPORTED_PERCENTILES: [u32; 10] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// Frequency counts sorted ascending. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentileLadder {
    sorted: Vec<u64>,
}

impl PercentileLadder {
    /// Sorts `counts` into a ladder. An empty input is an [`AnalyzerError::EmptyDataset`].
    pub fn new(mut counts: Vec<u64>) -> AnalyzerResult<Self> {
        if counts.is_empty() {
            return Err(AnalyzerError::EmptyDataset);
        }
        counts.sort_unstable();
        Ok(Self { sorted: counts })
    }

    pub fn from_table(table: &FrequencyTable) -> AnalyzerResult<Self> {
        Self::new(table.counts())
    }

    pub fn sorted_counts(&self) -> &[u64] {
        &self.sorted
    }

    fn last_rank(&self) -> usize {
        self.sorted.len() - 1
    }

    fn rank_index(&self, fraction: f64) -> f64 {
        fraction * self.last_rank() as f64
    }

    /// Estimates the `percentile`th percentile (0..=100) with linear interpolation.
    ///
    /// With a single count every percentile is that count.
    pub fn estimate(&self, percentile: u32) -> f64 {
        debug_assert!(percentile <= 100, "percentile out of range: {percentile}");

        let index = self.rank_index(percentile as f64 / 100.0);
        let lower_rank = (index as usize).min(self.last_rank());
        let lower = self.sorted[lower_rank];

        if index.fract() == 0.0 {
            return lower as f64;
        }

        let upper = self.sorted[(lower_rank + 1).min(self.last_rank())];
        lower as f64 + (upper - lower) as f64 * (index - lower_rank as f64)
    }

    /// `(percentile, estimate)` for each of [`REPORTED_PERCENTILES`].
    pub fn deciles(&self) -> Vec<(u32, f64)> {
        REPORTED_PERCENTILES
            .iter()
            .map(|&p| (p, self.estimate(p)))
            .collect()
    }

    /// Count at rank `floor(fraction * (n - 1))`, without interpolation.
    pub fn floored_rank_value(&self, fraction: f64) -> u64 {
        let rank = (self.rank_index(fraction) as usize).min(self.last_rank());
        self.sorted[rank]
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn ladder(counts: &[u64]) -> PercentileLadder {
        PercentileLadder::new(counts.to_vec()).unwrap()
    }

    #[test]
    fn empty_counts_are_rejected() {
        assert!(matches!(PercentileLadder::new(Vec::new()), Err(AnalyzerError::EmptyDataset)));
    }

    #[test]
    fn sorts_ascending() {
        assert_eq!(ladder(&[4, 1, 3, 1]).sorted_counts(), &[1, 1, 3, 4]);
    }

    #[rstest]
    #[case(10)]
    #[case(50)]
    #[case(90)]
    #[case(100)]
    fn single_count_is_every_percentile(#[case] percentile: u32) {
        assert_eq!(ladder(&[7]).estimate(percentile), 7.0);
    }

    #[rstest]
    #[case(10, 1.3)]
    #[case(50, 2.5)]
    #[case(90, 3.7)]
    #[case(100, 4.0)]
    fn interpolates_between_ranks(#[case] percentile: u32, #[case] expected: f64) {
        let estimate = ladder(&[1, 2, 3, 4]).estimate(percentile);
        assert!((estimate - expected).abs() < 1e-9, "p{percentile}: {estimate} != {expected}");
    }

    #[test]
    fn integer_index_returns_exact_rank() {
        // n - 1 = 10, so every decile lands on a rank
        let l = ladder(&[1, 1, 1, 2, 2, 3, 5, 8, 13, 21, 34]);
        assert_eq!(l.estimate(50), 3.0);
        assert_eq!(l.estimate(100), 34.0);
    }

    proptest! {
        #[test]
        fn deciles_never_decrease(counts in prop::collection::vec(1u64..10_000, 1..200)) {
            let l = ladder(&counts);
            let deciles = l.deciles();

            prop_assert_eq!(deciles.len(), 10);
            prop_assert_eq!(deciles.first().map(|d| d.0), Some(10));
            prop_assert_eq!(deciles.last().map(|d| d.0), Some(100));
            for pair in deciles.windows(2) {
                prop_assert!(pair[0].1 <= pair[1].1, "{:?}", pair);
            }
        }

        #[test]
        fn estimates_stay_within_range(counts in prop::collection::vec(1u64..10_000, 1..200)) {
            let l = ladder(&counts);
            let min = *l.sorted_counts().first().unwrap() as f64;
            let max = *l.sorted_counts().last().unwrap() as f64;

            for (_, value) in l.deciles() {
                prop_assert!(value >= min && value <= max);
            }
            prop_assert_eq!(l.estimate(100), max);
        }
    }

    #[test]
    fn floored_rank_does_not_interpolate() {
        // index = 0.9 * 3 = 2.7, floored to rank 2
        let l = ladder(&[1, 2, 3, 40]);
        assert_eq!(l.floored_rank_value(0.90), 3);
        assert!(l.estimate(90) > 3.0);
    }

    #[test]
    fn floored_rank_on_single_count() {
        assert_eq!(ladder(&[5]).floored_rank_value(0.90), 5);
    }
}
