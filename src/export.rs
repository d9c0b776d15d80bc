//! # Percentile-Filtered Export
//!
//! Selects the `Prime2` values whose count reaches the export threshold and writes
//! them as one tab-separated line.
//!
//! The threshold is the count at rank `floor(fraction * (n - 1))` of the sorted
//! counts, see [`PercentileLadder::floored_rank_value`]. It is deliberately not the
//! interpolated percentile printed in the summary.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::frequency::FrequencyTable;
use crate::percentiles::PercentileLadder;

pub const DEFAULT_OUTPUT_PATH: &str = "top-percentile-primes.txt";
pub const DEFAULT_EXPORT_PERCENTILE: u32 = 90;

/// The keys chosen for export and the count threshold that chose them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentileSelection {
    pub threshold: u64,
    pub primes: Vec<u64>,
}

impl PercentileSelection {
    /// Selects every prime with `count >= threshold`, in first-seen order.
    ///
    /// # Arguments
    ///
    /// * `table` - Frequency table of the `Prime2` column
    /// * `ladder` - The same counts, sorted
    /// * `percentile` - Whole percentile (0..=100) picking the threshold rank
    pub fn select(table: &FrequencyTable, ladder: &PercentileLadder, percentile: u32) -> Self {
        let threshold = ladder.floored_rank_value(percentile as f64 / 100.0);
        debug!("Export threshold for percentile {}: count >= {}", percentile, threshold);

        let primes = table
            .iter()
            .filter(|&(_, count)| count >= threshold)
            .map(|(prime, _)| prime)
            .collect();

        Self { threshold, primes }
    }

    /// The primes joined by single tabs. No trailing newline.
    pub fn to_line(&self) -> String {
        self.primes
            .iter()
            .map(|prime| prime.to_string())
            .collect::<Vec<_>>()
            .join("\t")
    }

    /// Creates or truncates `output_path` and writes [`Self::to_line`] to it.
    pub fn write_to(&self, output_path: impl AsRef<Path>) -> AnalyzerResult<()> {
        let path = output_path.as_ref();
        fs::write(path, self.to_line()).map_err(|source| AnalyzerError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Wrote {} primes to {}", self.primes.len(), path.display());
        Ok(())
    }
}
