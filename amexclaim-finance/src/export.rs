//! Write claim frames as one .xlsx or .csv file per cardholder, or bundle them
//! into a single ZIP archive.

use amexclaim_core::columns::CLAIM_FILE_SUFFIX;
use amexclaim_core::{Cell, ClaimError, Result, Table};
use rust_xlsxwriter::{Format, Workbook};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::claim_frames::ClaimFrames;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Excel,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excel" | "xlsx" => Ok(Self::Excel),
            "csv" => Ok(Self::Csv),
            other => Err(format!("invalid export format '{other}' (expected 'excel' or 'csv')")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Excel => "excel",
            Self::Csv => "csv",
        })
    }
}

/// `<surname>_AMEX_Claim.<ext>`; path separators in the surname become `_`.
pub fn claim_file_name(cardholder: &str, format: ExportFormat) -> String {
    let safe: String = cardholder
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{safe}{CLAIM_FILE_SUFFIX}.{}", format.extension())
}

/// File names for every frame, in frame order. When two surnames sanitize to the
/// same name (`A/B` and `A_B`), later ones get a `_2`, `_3`, ... suffix.
pub fn claim_file_names(frames: &ClaimFrames, format: ExportFormat) -> Vec<String> {
    let mut taken = HashSet::new();
    frames
        .iter()
        .map(|frame| {
            let mut name = claim_file_name(&frame.cardholder, format);
            let mut n = 2;
            while taken.contains(&name) {
                name = claim_file_name(&format!("{}_{n}", frame.cardholder), format);
                n += 1;
            }
            if n > 2 {
                warn!(cardholder = %frame.cardholder, "claim file name collision, writing {name}");
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

pub fn render_frame(table: &Table, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Excel => render_xlsx(table),
        ExportFormat::Csv => render_csv(table),
    }
}

fn render_csv(table: &Table) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(Cell::to_string))?;
    }
    wtr.into_inner().map_err(|e| ClaimError::Io(e.into_error()))
}

fn render_xlsx(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header = Format::new().set_bold();
    let date = Format::new().set_num_format("yyyy-mm-dd");
    let date_time = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (col, name) in table.columns().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, name, &header)
            .map_err(ClaimError::workbook)?;
    }

    for (r, row) in table.rows().iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            let written = match cell {
                Cell::Empty => continue,
                Cell::Number(n) => worksheet.write_number(r, c, *n),
                Cell::Bool(b) => worksheet.write_boolean(r, c, *b),
                Cell::DateTime(dt) if dt.time() == NaiveTime::MIN => {
                    worksheet.write_datetime_with_format(r, c, dt, &date)
                }
                Cell::DateTime(dt) => worksheet.write_datetime_with_format(r, c, dt, &date_time),
                other => worksheet.write_string(r, c, other.to_string()),
            };
            written.map_err(ClaimError::workbook)?;
        }
    }

    workbook.save_to_buffer().map_err(ClaimError::workbook)
}

/// Write one file per claim frame into `output_dir` (created if missing),
/// overwriting existing files. Returns the paths in generation order.
pub fn save_claim_frames(
    frames: &ClaimFrames,
    output_dir: impl AsRef<Path>,
    format: ExportFormat,
) -> Result<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut exported = Vec::with_capacity(frames.len());
    for (frame, file_name) in frames.iter().zip(claim_file_names(frames, format)) {
        let out_path = output_dir.join(file_name);
        fs::write(&out_path, render_frame(&frame.table, format)?)?;
        info!(
            rows = frame.table.len(),
            cardholder = %frame.cardholder,
            "wrote {}",
            out_path.display()
        );
        exported.push(out_path);
    }
    Ok(exported)
}

/// Write every claim file into one ZIP archive at `zip_path`.
pub fn bundle_claim_frames(
    frames: &ClaimFrames,
    zip_path: impl AsRef<Path>,
    format: ExportFormat,
) -> Result<PathBuf> {
    let zip_path = zip_path.as_ref();
    if let Some(parent) = zip_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut zip = ZipWriter::new(File::create(zip_path)?);
    let options = SimpleFileOptions::default();
    for (frame, file_name) in frames.iter().zip(claim_file_names(frames, format)) {
        zip.start_file(file_name, options)
            .map_err(ClaimError::archive)?;
        zip.write_all(&render_frame(&frame.table, format)?)?;
    }
    zip.finish().map_err(ClaimError::archive)?;

    info!(files = frames.len(), "bundled claim files into {}", zip_path.display());
    Ok(zip_path.to_path_buf())
}
