//! Plain headed tables (first row is the header), used for output templates and
//! corporate card mapping files. Only delimited text and Excel are accepted.

use amexclaim_core::{normalize_column_name, Cell, ClaimError, Result, Table};
use std::path::Path;

use crate::format::{detect_format, SourceFormat};
use crate::readers::{delimited, read_raw_grid};

fn detect_tabular_format(path: &Path, file_name: Option<&str>) -> Result<SourceFormat> {
    match detect_format(path, file_name)? {
        SourceFormat::Json => Err(ClaimError::UnsupportedFormat(format!(
            "{} (expected .csv, .txt, .xlsx or .xls)",
            SourceFormat::Json
        ))),
        other => Ok(other),
    }
}

/// Normalized names from the header row only; blank header cells become "".
pub fn read_header_row(path: impl AsRef<Path>, file_name: Option<&str>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let header = match detect_tabular_format(path, file_name)? {
        SourceFormat::Csv => delimited::read_first_record(path, b',')?,
        SourceFormat::Txt => delimited::read_first_record(path, b'\t')?,
        format => read_raw_grid(path, format)?
            .into_iter()
            .find(|row| !is_empty_row(row))
            .unwrap_or_default(),
    };
    Ok(header_names(&header))
}

/// Read a table whose first non-empty row is the header. Fully-empty rows are dropped.
pub fn load_table(path: impl AsRef<Path>, file_name: Option<&str>) -> Result<Table> {
    let path = path.as_ref();
    let format = detect_tabular_format(path, file_name)?;
    let mut grid = read_raw_grid(path, format)?
        .into_iter()
        .skip_while(|row| is_empty_row(row));
    let columns = grid.next().map(|h| header_names(&h)).unwrap_or_default();

    let mut table = Table::from_rows(columns, grid.collect());
    table.drop_empty_rows();
    Ok(table)
}

fn is_empty_row(row: &[Cell]) -> bool {
    row.iter().all(Cell::is_empty)
}

fn header_names(cells: &[Cell]) -> Vec<String> {
    cells
        .iter()
        .map(|c| normalize_column_name(&c.to_string()))
        .collect()
}
