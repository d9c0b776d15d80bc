//! Error taxonomy for the prime pair analyzer.
//!
//! Every failure the pipeline can hit is one of these variants. All of them are
//! terminal: the run stops before any report section reaches stdout.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A failure while loading, analyzing or exporting a prime pair dataset.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The input CSV path does not exist.
    #[error("input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    /// The header row is missing one of the required column names.
    #[error("missing required column '{column}' in header of {}", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// A data row has an absent or non-integer field.
    #[error("malformed row {row} (line {line}): column '{column}' has value {value:?}: {reason}")]
    MalformedRow {
        row: usize,
        line: u64,
        column: &'static str,
        value: String,
        reason: String,
    },

    /// No records were parsed, so percentiles and rankings are undefined.
    #[error("dataset is empty: no records to analyze")]
    EmptyDataset,

    /// The export destination could not be written.
    #[error("failed to write output file {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV reader rejected the input.
    #[error("failed to read CSV {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Any other I/O failure, e.g. while writing the report to stdout.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
