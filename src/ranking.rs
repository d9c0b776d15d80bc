//! Ranking of rows by their `Diff Bits` value, and the fixed-width table used to print them.

use std::io::{self, Write};

use crate::records::PrimeRow;

pub const TABLE_HEADER: &str = "Diff Bits | Prime1 | Prime2";
pub const TABLE_SEPARATOR_WIDTH: usize = 30;

/// Returns the `n` rows with the largest `diff_bits`, largest first.
///
/// The sort is stable: rows with equal `diff_bits` keep their input order.
pub fn top_by_diff_bits(rows: &[PrimeRow], n: usize) -> Vec<PrimeRow> {
    let mut ranked = rows.to_vec();
    ranked.sort_by(|a, b| b.diff_bits.cmp(&a.diff_bits));
    ranked.truncate(n);
    ranked
}

/// Formats one row right-aligned under [`TABLE_HEADER`]. Wide values are never truncated.
pub fn format_table_row(row: &PrimeRow) -> String {
    format!("{:>9} | {:>6} | {:>6}", row.diff_bits, row.prime1, row.prime2)
}

/// Writes the header, the dash separator and one line per row.
pub fn write_diff_bits_table<W: Write>(out: &mut W, rows: &[PrimeRow]) -> io::Result<()> {
    writeln!(out, "{}", TABLE_HEADER)?;
    writeln!(out, "{}", "-".repeat(TABLE_SEPARATOR_WIDTH))?;
    for row in rows {
        writeln!(out, "{}", format_table_row(row))?;
    }
    Ok(())
}
