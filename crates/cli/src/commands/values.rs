//! `values` command: list a column's distinct values.

use std::io::Write;
use std::path::Path;

use souq_core::table::{Record, unique_values};

use super::check_column;
use crate::dataset;

/// Run the command, printing one value per line in first-seen order.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded, the column is unknown,
/// or stdout is closed.
pub fn run(
    file: &Path,
    column: &str,
    table: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = dataset::load(file, table)?;
    let mut out = std::io::stdout().lock();
    for value in distinct(&rows, column)? {
        writeln!(out, "{value}")?;
    }
    Ok(())
}

fn distinct(rows: &[Record], column: &str) -> Result<Vec<String>, super::CommandError> {
    let known: Vec<String> = dataset::columns(rows)
        .into_iter()
        .map(|column| column.field)
        .collect();
    check_column(column, &known)?;

    Ok(unique_values(rows, &column.to_string())
        .iter()
        .map(ToString::to_string)
        .collect())
}
