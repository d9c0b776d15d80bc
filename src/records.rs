//! # Prime Pair Record Loader
//!
//! Reads a delimited prime pair file fully into memory. The file must carry a
//! header row naming the `Diff Bits`, `Prime1` and `Prime2` columns; columns are
//! located by name, so their order and any extra columns don't matter. Header
//! names must match exactly, padding included; only data fields are trimmed.
//!
//! Every data row must parse into three integers. The first bad field aborts the
//! load with an error naming the row, line and column.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};

use crate::errors::{AnalyzerError, AnalyzerResult};

pub const DIFF_BITS_COLUMN: &str = "Diff Bits";
pub const PRIME1_COLUMN: &str = "Prime1";
pub const PRIME2_COLUMN: &str = "Prime2";

/// One parsed input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeRow {
    pub diff_bits: i64,
    pub prime1: u64,
    pub prime2: u64,
}

impl PrimeRow {
    pub fn new(diff_bits: i64, prime1: u64, prime2: u64) -> Self {
        Self { diff_bits, prime1, prime2 }
    }
}

/// Positions of the required columns within the header row.
struct ColumnLayout {
    diff_bits: usize,
    prime1: usize,
    prime2: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord, source: &Path) -> AnalyzerResult<Self> {
        let locate = |column: &'static str| {
            headers
                .iter()
                .position(|name| name == column)
                .ok_or_else(|| AnalyzerError::MissingColumn {
                    path: source.to_path_buf(),
                    column,
                })
        };

        Ok(Self {
            diff_bits: locate(DIFF_BITS_COLUMN)?,
            prime1: locate(PRIME1_COLUMN)?,
            prime2: locate(PRIME2_COLUMN)?,
        })
    }
}

/// Loads every prime pair row from the file at `input_file_path`.
///
/// # Arguments
///
/// * `input_file_path` - Path to the input CSV file
/// * `delimiter` - Field delimiter byte, usually `b','`
///
/// # Returns
///
/// * `AnalyzerResult<Vec<PrimeRow>>` - Rows in input order, or the first load failure
pub fn load_prime_rows(input_file_path: impl AsRef<Path>, delimiter: u8) -> AnalyzerResult<Vec<PrimeRow>> {
    let path = input_file_path.as_ref();

    // A missing file gets its own error; everything else is a plain I/O failure
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AnalyzerError::InputNotFound { path: path.to_path_buf() },
        _ => AnalyzerError::Io(e),
    })?;

    let rows = read_prime_rows(BufReader::new(file), delimiter, path)?;
    info!("Loaded {} rows from {}", rows.len(), path.display());

    Ok(rows)
}

/// Parses prime pair rows from any reader. `source` is only used in error messages.
pub fn read_prime_rows<R: Read>(reader: R, delimiter: u8, source: &Path) -> AnalyzerResult<Vec<PrimeRow>> {
    let csv_error = |e: csv::Error| AnalyzerError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    // Short rows are reported per field below, so the reader stays flexible.
    // Trim::Fields leaves the header untouched.
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::Fields)
        .from_reader(reader);

    // Resolve column positions once from the header row
    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    let layout = ColumnLayout::from_headers(&headers, source)?;
    debug!(
        "Column layout for {}: diff_bits={}, prime1={}, prime2={}",
        source.display(),
        layout.diff_bits,
        layout.prime1,
        layout.prime2
    );

    // Reuse one record buffer for the whole file
    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    let mut row_number = 0;

    while csv_reader.read_record(&mut record).map_err(csv_error)? {
        row_number += 1;
        // Line numbers are 1-based and count the header
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);

        rows.push(PrimeRow::new(
            parse_field(&record, layout.diff_bits, DIFF_BITS_COLUMN, row_number, line)?,
            parse_field(&record, layout.prime1, PRIME1_COLUMN, row_number, line)?,
            parse_field(&record, layout.prime2, PRIME2_COLUMN, row_number, line)?,
        ));
    }

    Ok(rows)
}

fn parse_field<T>(
    record: &StringRecord,
    index: usize,
    column: &'static str,
    row: usize,
    line: u64,
) -> AnalyzerResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = record.get(index).ok_or_else(|| AnalyzerError::MalformedRow {
        row,
        line,
        column,
        value: String::new(),
        reason: "field is missing".to_string(),
    })?;

    raw.parse::<T>().map_err(|e| AnalyzerError::MalformedRow {
        row,
        line,
        column,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn read(data: &str) -> AnalyzerResult<Vec<PrimeRow>> {
        read_prime_rows(data.as_bytes(), b',', Path::new("inline.csv"))
    }

    #[test]
    fn reads_rows_in_input_order() {
        let rows = read("Diff Bits,Prime1,Prime2\n5,11,13\n3,7,13\n5,11,13\n").unwrap();
        assert_eq!(
            rows,
            vec![PrimeRow::new(5, 11, 13), PrimeRow::new(3, 7, 13), PrimeRow::new(5, 11, 13)]
        );
    }

    #[test]
    fn locates_columns_by_name() {
        let rows = read("Prime2,extra,Prime1,Diff Bits\n13,x,11,5\n").unwrap();
        assert_eq!(rows, vec![PrimeRow::new(5, 11, 13)]);
    }

    #[test]
    fn ignores_whitespace_around_fields() {
        let rows = read("Diff Bits,Prime1,Prime2\n 4 , 17 ,19 \n").unwrap();
        assert_eq!(rows, vec![PrimeRow::new(4, 17, 19)]);
    }

    #[test]
    fn padded_header_name_is_not_a_match() {
        let err = read("Diff Bits,Prime1, Prime2\n1,2,3\n").unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingColumn { column: PRIME2_COLUMN, .. }));

        let err = read(" Diff Bits ,Prime1 ,  Prime2\n1,2,3\n").unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingColumn { column: DIFF_BITS_COLUMN, .. }));
    }

    #[test]
    fn header_only_file_yields_no_rows() {
        assert!(read("Diff Bits,Prime1,Prime2\n").unwrap().is_empty());
    }

    #[test]
    fn missing_column_is_reported() {
        let err = read("Diff Bits,Prime1\n5,11\n").unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingColumn { column: PRIME2_COLUMN, .. }));
    }

    #[test]
    fn non_integer_field_names_row_and_column() {
        let err = read("Diff Bits,Prime1,Prime2\n5,11,13\n3,seven,13\n").unwrap_err();
        match err {
            AnalyzerError::MalformedRow { row, line, column, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(line, 3);
                assert_eq!(column, PRIME1_COLUMN);
                assert_eq!(value, "seven");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_row_is_malformed() {
        let err = read("Diff Bits,Prime1,Prime2\n5,11\n").unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::MalformedRow { row: 1, column: PRIME2_COLUMN, .. }
        ));
    }

    #[test]
    fn negative_prime_is_malformed() {
        let err = read("Diff Bits,Prime1,Prime2\n-2,-11,13\n").unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::MalformedRow { column: PRIME1_COLUMN, .. }
        ));
    }

    #[test]
    fn honours_custom_delimiter() {
        let data = "Diff Bits\tPrime1\tPrime2\n2\t3\t5\n";
        let rows = read_prime_rows(data.as_bytes(), b'\t', Path::new("inline.tsv")).unwrap();
        assert_eq!(rows, vec![PrimeRow::new(2, 3, 5)]);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Diff Bits,Prime1,Prime2\n7,101,103").unwrap();

        let rows = load_prime_rows(file.path(), b',').unwrap();
        assert_eq!(rows, vec![PrimeRow::new(7, 101, 103)]);
    }

    #[test]
    fn missing_input_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.csv");

        match load_prime_rows(&path, b',').unwrap_err() {
            AnalyzerError::InputNotFound { path: reported } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
