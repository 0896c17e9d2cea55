//! Output column layout: the built-in claim import layout, or the header row of
//! a user-supplied template file.

use amexclaim_core::columns::DEFAULT_TEMPLATE_COLUMNS;
use amexclaim_core::{ClaimError, Result};
use amexclaim_ingest::read_header_row;
use std::path::Path;
use tracing::info;

pub fn default_template_columns() -> Vec<String> {
    DEFAULT_TEMPLATE_COLUMNS.iter().map(|c| c.to_string()).collect()
}

pub fn resolve_template(path: Option<&Path>, file_name: Option<&str>) -> Result<Vec<String>> {
    let Some(path) = path else {
        return Ok(default_template_columns());
    };

    let columns = dedup_columns(read_header_row(path, file_name)?);
    if columns.is_empty() {
        return Err(ClaimError::EmptyResult(format!(
            "template {} has no column names in its first row",
            path.display()
        )));
    }
    info!(columns = columns.len(), "loaded template {}", path.display());
    Ok(columns)
}

/// Drop blank names and repeats, keeping first occurrences in order.
pub fn dedup_columns(columns: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for column in columns {
        if !column.is_empty() && !unique.contains(&column) {
            unique.push(column);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_layout_order() {
        let cols = resolve_template(None, None).unwrap();
        assert_eq!(cols.len(), 11);
        assert_eq!(cols[0], "Branch");
        assert_eq!(cols[9], "Corporate Card");
        assert_eq!(cols[10], "AR Reference Nbr.");
    }

    #[test]
    fn test_template_file_dedups() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("Oct_2024_Corp_Expense_Claim_Template.csv");
        fs::write(&path, "Date,Amount,\"Claim\n Amount\",Amount,,Corporate Card\n").unwrap();

        let cols = resolve_template(Some(&path), None).unwrap();
        assert_eq!(cols, vec!["Date", "Amount", "Claim Amount", "Corporate Card"]);
    }

    #[test]
    fn test_empty_template_fails() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("blank.csv");
        fs::write(&path, "").unwrap();
        assert!(matches!(
            resolve_template(Some(&path), None),
            Err(ClaimError::EmptyResult(_))
        ));
    }

    #[test]
    fn test_unsupported_template() {
        assert!(matches!(
            resolve_template(Some(Path::new("layout.pdf")), None),
            Err(ClaimError::UnsupportedFormat(_))
        ));
    }
}
