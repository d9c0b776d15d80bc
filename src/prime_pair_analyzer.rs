//! # Prime Pair Analyzer
//!
//! Loads a CSV of prime pairs (`Diff Bits`, `Prime1`, `Prime2`) into memory and
//! prints a statistics report about it:
//!
//! 1. The most common `Prime2` values and their counts
//! 2. The number of distinct `Prime2` values
//! 3. Percentiles (10th..100th) of the `Prime2` occurrence counts
//! 4. The rows with the largest `Diff Bits`, as a fixed-width table
//!
//! The `Prime2` values whose count is in the top percentile band are also written
//! to a tab-separated text file.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze a file, export to ./top-percentile-primes.txt
//! $ cargo run --release -- primes.csv
//!
//! # Custom export path, top 50 rankings, debug logging
//! $ cargo run --release -- primes.csv out/top.txt --top 50 -vv
//! ```
//!
//! ## Failure Policy
//!
//! Every failure is terminal. The report is rendered into memory and only printed
//! once the export file has been written, so a failed run never leaves half a
//! report on stdout.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use log::{LevelFilter, debug, info};

use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::export::{DEFAULT_EXPORT_PERCENTILE, DEFAULT_OUTPUT_PATH, PercentileSelection};
use crate::frequency::FrequencyTable;
use crate::percentiles::PercentileLadder;
use crate::ranking::{top_by_diff_bits, write_diff_bits_table};
use crate::records::{PrimeRow, load_prime_rows};

const DEFAULT_TOP_N: usize = 25;

/// Command line arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Frequency, percentile and ranking report for a CSV of prime pairs"
)]
pub struct AnalyzerArgs {
    /// Input CSV with a `Diff Bits,Prime1,Prime2` header.
    pub input: PathBuf,

    /// File receiving the tab-separated top percentile `Prime2` values.
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Number of entries in the frequency and diff bits rankings.
    #[arg(short = 'n', long = "top", default_value_t = DEFAULT_TOP_N, value_parser = parse_top_n)]
    pub top_n: usize,

    /// Whole percentile of the occurrence counts used as the export threshold.
    #[arg(
        short = 'p',
        long,
        default_value_t = DEFAULT_EXPORT_PERCENTILE,
        value_parser = clap::value_parser!(u32).range(0..=100)
    )]
    pub export_percentile: u32,

    /// Input field delimiter, a single ASCII character (`\t` for tab).
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Enable verbose logging. (Specify more than once for more detail.)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl AnalyzerArgs {
    /// Log level for the requested verbosity. Warnings are always shown.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn parse_top_n(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(format!("delimiter must be a single ASCII character, got {:?}", value)),
        },
    }
}

/// English ordinal suffix for `n`: `1st`, `2nd`, `3rd`, `11th`, `10th`...
fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Everything the report prints, computed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimePairReport {
    pub top_n: usize,
    pub most_common: Vec<(u64, u64)>,
    pub distinct: usize,
    pub deciles: Vec<(u32, f64)>,
    pub top_diff_bits: Vec<PrimeRow>,
    pub selection: PercentileSelection,
    pub export_percentile: u32,
}

/// Computes every derived view of `rows`.
///
/// # Arguments
///
/// * `rows` - Parsed prime pair rows, in input order
/// * `top_n` - Length of the frequency and diff bits rankings
/// * `export_percentile` - Whole percentile selecting the export threshold
///
/// # Returns
///
/// * `AnalyzerResult<PrimePairReport>` - The report, or `EmptyDataset` when `rows` is empty
pub fn analyze_prime_rows(
    rows: &[PrimeRow],
    top_n: usize,
    export_percentile: u32,
) -> AnalyzerResult<PrimePairReport> {
    if rows.is_empty() {
        return Err(AnalyzerError::EmptyDataset);
    }

    let table = FrequencyTable::from_rows(rows);
    let ladder = PercentileLadder::from_table(&table)?;
    debug!(
        "{} rows, {} distinct Prime2 values, total count {}",
        rows.len(),
        table.distinct(),
        table.total()
    );
    debug!(
        "Occurrence counts range from {} to {}",
        ladder.sorted_counts().first().copied().unwrap_or(0),
        ladder.sorted_counts().last().copied().unwrap_or(0)
    );

    let selection = PercentileSelection::select(&table, &ladder, export_percentile);
    info!(
        "{} of {} Prime2 values reach the export threshold of {}",
        selection.primes.len(),
        table.distinct(),
        selection.threshold
    );

    Ok(PrimePairReport {
        top_n,
        most_common: table.most_common(top_n),
        distinct: table.distinct(),
        deciles: ladder.deciles(),
        top_diff_bits: top_by_diff_bits(rows, top_n),
        selection,
        export_percentile,
    })
}

/// Writes the four summary sections of the report.
///
/// # Report Sections
///
/// * Most common `Prime2` values as `value: count`
/// * Count of distinct `Prime2` values
/// * Ten percentile lines with two decimals
/// * Diff bits table
pub fn write_summary<W: Write>(out: &mut W, report: &PrimePairReport) -> io::Result<()> {
    writeln!(out, "Top {} most common numbers in Prime2:", report.top_n)?;
    for (prime, count) in &report.most_common {
        writeln!(out, "{}: {}", prime, count)?;
    }

    writeln!(out, "\nNumber of unique values in Prime2: {}", report.distinct)?;

    writeln!(out, "\nPercentiles for unique counts in Prime2:")?;
    for (percentile, value) in &report.deciles {
        writeln!(out, "{}th percentile: {:.2}", percentile, value)?;
    }

    writeln!(out, "\nTop {} primes with highest diff bits:", report.top_n)?;
    write_diff_bits_table(out, &report.top_diff_bits)?;

    Ok(())
}

/// Runs the whole pipeline and writes the report to `out`.
///
/// # Workflow
///
/// 1. Load every row from `args.input`
/// 2. Compute the frequency table, percentiles, rankings and export selection
/// 3. Render the summary into memory
/// 4. Write the export file
/// 5. Copy the summary and the export confirmation to `out`
///
/// Nothing reaches `out` unless steps 1-4 all succeed.
pub fn run_analysis<W: Write>(args: &AnalyzerArgs, out: &mut W) -> AnalyzerResult<()> {
    // Load and compute everything before touching any output
    let rows = load_prime_rows(&args.input, args.delimiter)?;
    let report = analyze_prime_rows(&rows, args.top_n, args.export_percentile)?;

    // Render the summary into memory so a later failure prints nothing
    let mut summary = Vec::new();
    write_summary(&mut summary, &report)?;

    // Export file first; if this fails the report is discarded
    report.selection.write_to(&args.output)?;

    // Only now does the report reach the caller
    let band = 100 - report.export_percentile;
    out.write_all(&summary)?;
    writeln!(
        out,
        "\nTop {}{} percentile of Prime2 saved to '{}'",
        band,
        ordinal_suffix(band),
        args.output.display()
    )?;
    out.flush()?;

    Ok(())
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Main entry point for the prime pair analyzer application.
///
/// Parses the command line, sets up logging on stderr and runs the analysis
/// against stdout. Any error is printed to stderr and the process exits with
/// status 1.
///
/// # Examples
///
/// ```bash
/// prime_pair_analyzer_rust output_20240801_115631.csv
/// prime_pair_analyzer_rust primes.tsv --delimiter '\t' --export-percentile 75
/// ```
pub fn prime_pair_analyzer_main() {
    let args = AnalyzerArgs::parse();
    init_logging(args.log_level());

    info!("Analyzing prime pairs in {}", args.input.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run_analysis(&args, &mut out) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
