//! Prime Pair Analyzer - Main Application
//!
//! Entry point for the prime pair statistics reporter. All of the work happens in
//! the `prime_pair_analyzer` module; the remaining modules are the pipeline stages
//! it drives.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage (exports to "top-percentile-primes.txt")
//! $ cargo run --release -- path/to/primes.csv
//!
//! # With custom export file
//! $ cargo run --release -- path/to/primes.csv custom/top-primes.txt
//! ```

mod errors;
mod export;
mod frequency;
mod percentiles;
mod prime_pair_analyzer;
mod ranking;
mod records;

use prime_pair_analyzer::prime_pair_analyzer_main;

/// call from module
fn main() {
    prime_pair_analyzer_main();
}
