//! CSV and tab-delimited text. Every non-empty value is kept as text.

use amexclaim_core::{Cell, ClaimError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::RawGrid;

pub fn read_delimited_path(path: &Path, delimiter: u8) -> Result<RawGrid> {
    let file = File::open(path)?;
    read_delimited(file, delimiter)
}

pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<RawGrid> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut grid = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(ClaimError::from)?;
        grid.push(record.iter().map(Cell::from).collect());
    }
    Ok(grid)
}

/// First record only; used where just the header row matters.
pub fn read_first_record(path: &Path, delimiter: u8) -> Result<Vec<Cell>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .delimiter(delimiter)
        .from_path(path)?;

    match rdr.records().next() {
        Some(record) => Ok(record?.iter().map(Cell::from).collect()),
        None => Ok(Vec::new()),
    }
}
