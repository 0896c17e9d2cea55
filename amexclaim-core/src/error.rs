use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClaimError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error(
        "Unable to detect header row within the first {scanned} rows. Ensure the statement \
         includes a column similar to 'Transaction Amount USD'."
    )]
    HeaderNotFound { scanned: usize },

    #[error("Column '{column}' not found. Available columns: {available:?}")]
    ColumnMissing { column: String, available: Vec<String> },

    #[error("Invalid corporate card mapping: {0}")]
    InvalidMapping(String),

    #[error("Nothing to export: {0}")]
    EmptyResult(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Archive error: {0}")]
    Archive(String),
}

impl ClaimError {
    pub fn column_missing(column: impl Into<String>, available: &[String]) -> Self {
        Self::ColumnMissing {
            column: column.into(),
            available: available.to_vec(),
        }
    }

    pub fn workbook(err: impl std::fmt::Display) -> Self {
        Self::Workbook(err.to_string())
    }

    pub fn archive(err: impl std::fmt::Display) -> Self {
        Self::Archive(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClaimError>;
