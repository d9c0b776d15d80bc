//! Occurrence counts of the `Prime2` column.

use indexmap::IndexMap;

use crate::records::PrimeRow;

/// Count of each distinct `Prime2` value, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<u64, u64>,
}

impl FrequencyTable {
    /// Builds the table in a single pass over `rows`.
    pub fn from_rows(rows: &[PrimeRow]) -> Self {
        let mut counts: IndexMap<u64, u64> = IndexMap::new();
        for row in rows {
            *counts.entry(row.prime2).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of distinct `Prime2` values.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts; equals the number of rows the table was built from.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(prime, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&prime, &count)| (prime, count))
    }

    /// The bare counts, in first-seen order of their keys.
    pub fn counts(&self) -> Vec<u64> {
        self.counts.values().copied().collect()
    }

    /// Returns the `n` most frequent values, highest count first.
    ///
    /// The sort is stable, so values with equal counts keep the order in which
    /// they first appeared in the input.
    pub fn most_common(&self, n: usize) -> Vec<(u64, u64)> {
        let mut by_count: Vec<(u64, u64)> = self.iter().collect();
        by_count.sort_by(|a, b| b.1.cmp(&a.1));
        by_count.truncate(n);
        by_count
    }
}
