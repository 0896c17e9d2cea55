//! Corporate card mapping: "<card id> - <employee name>" labels keyed by the
//! employee's lower-cased surname.

use amexclaim_core::columns::{CORPORATE_CARD, NOT_ASSIGNED};
use amexclaim_core::{Cell, ClaimError, Result, Table};
use amexclaim_ingest::load_table;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::claim_frames::ClaimFrames;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Lower-cased last token of `combined`
    pub key: String,
    pub combined: String,
}

#[derive(Debug, Clone, Default)]
pub struct CorporateMapping {
    entries: Vec<MappingEntry>,
    index: HashMap<String, usize>,
}

impl CorporateMapping {
    /// Build from (id, name) pairs. Later duplicates of a surname are ignored.
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut mapping = Self::default();
        for (id, name) in pairs {
            mapping.insert(format!("{} - {}", id.as_ref().trim(), name.as_ref().trim()));
        }
        mapping
    }

    /// First two columns of a headed table; needs at least two columns.
    pub fn from_table(table: &Table) -> Result<Self> {
        if table.columns().len() < 2 {
            return Err(ClaimError::InvalidMapping(format!(
                "corporate card file must contain at least two columns, found {:?}",
                table.columns()
            )));
        }
        Ok(Self::from_pairs(
            table
                .rows()
                .iter()
                .map(|row| (stringify_cell(&row[0]), stringify_cell(&row[1]))),
        ))
    }

    fn insert(&mut self, combined: String) {
        let Some(last) = combined.split_whitespace().last() else {
            return;
        };
        let key = last.to_lowercase();
        if self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(MappingEntry { key, combined });
    }

    pub fn lookup(&self, surname: &str) -> Option<&str> {
        self.index
            .get(&surname.trim().to_lowercase())
            .map(|&i| self.entries[i].combined.as_str())
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Render a mapping cell. Whole numbers (card ids read from Excel as floats)
/// render without a fractional part.
pub fn stringify_cell(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        other => other.to_string().trim().to_string(),
    }
}

pub fn load_corporate_mapping(path: impl AsRef<Path>, file_name: Option<&str>) -> Result<CorporateMapping> {
    let path = path.as_ref();
    let table = load_table(path, file_name)?;
    let mapping = CorporateMapping::from_table(&table)?;
    info!(entries = mapping.len(), "loaded corporate card mapping {}", path.display());
    Ok(mapping)
}

/// Set each frame's Corporate Card column to its cardholder's label, or
/// "Not Assigned" when there is no match or no mapping at all.
pub fn apply_corporate_cards(frames: &mut ClaimFrames, mapping: Option<&CorporateMapping>) {
    for frame in frames.iter_mut() {
        let label = match mapping.and_then(|m| m.lookup(&frame.cardholder)) {
            Some(label) => label,
            None => {
                if mapping.is_some() {
                    warn!(cardholder = %frame.cardholder, "no corporate card found");
                }
                NOT_ASSIGNED
            }
        };
        if let Some(idx) = frame.table.column_index(CORPORATE_CARD) {
            frame.table.fill_column(idx, &Cell::text(label));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim_frames::{generate_claim_frames, ClaimLayout};
    use crate::template::default_template_columns;
    use std::fs;
    use tempfile::tempdir;

    fn frames() -> ClaimFrames {
        let statement = Table::from_rows(
            vec!["Transaction Amount USD".into(), "Supplemental Cardmember Last Name".into()],
            vec![
                vec![Cell::Number(10.0), "Smith".into()],
                vec![Cell::Number(20.0), "Doe".into()],
            ],
        );
        generate_claim_frames(&statement, &default_template_columns(), &ClaimLayout::default()).unwrap()
    }

    fn corporate_card(frames: &ClaimFrames, cardholder: &str) -> Cell {
        let table = &frames.get(cardholder).unwrap().table;
        let idx = table.column_index("Corporate Card").unwrap();
        table.rows()[0][idx].clone()
    }

    #[test]
    fn test_combined_label_and_key() {
        let mapping = CorporateMapping::from_pairs([("1234", "Jane Smith")]);
        assert_eq!(mapping.entries()[0].combined, "1234 - Jane Smith");
        assert_eq!(mapping.entries()[0].key, "smith");
        assert_eq!(mapping.lookup(" SMITH "), Some("1234 - Jane Smith"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mapping = CorporateMapping::from_pairs([("1234", "Jane Smith"), ("9999", "Bob Smith")]);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.lookup("smith"), Some("1234 - Jane Smith"));
    }

    #[test]
    fn test_whole_numbers_render_as_integers() {
        assert_eq!(stringify_cell(&Cell::Number(1234.0)), "1234");
        assert_eq!(stringify_cell(&Cell::Number(12.5)), "12.5");
        assert_eq!(stringify_cell(&Cell::from("  Jane Smith ")), "Jane Smith");
    }

    #[test]
    fn test_apply_with_mapping() {
        let mut frames = frames();
        let mapping = CorporateMapping::from_pairs([("1234", "Jane Smith")]);
        apply_corporate_cards(&mut frames, Some(&mapping));
        assert_eq!(corporate_card(&frames, "Smith"), Cell::Text("1234 - Jane Smith".into()));
        assert_eq!(corporate_card(&frames, "Doe"), Cell::Text("Not Assigned".into()));
    }

    #[test]
    fn test_apply_without_mapping() {
        let mut frames = frames();
        apply_corporate_cards(&mut frames, None);
        assert_eq!(corporate_card(&frames, "Smith"), Cell::Text("Not Assigned".into()));
    }

    #[test]
    fn test_single_column_file_is_invalid() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("cards.csv");
        fs::write(&path, "Employee\nJane Smith\n").unwrap();
        assert!(matches!(
            load_corporate_mapping(&path, None),
            Err(ClaimError::InvalidMapping(_))
        ));
    }

    #[test]
    fn test_load_mapping_csv() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("cards.csv");
        fs::write(&path, "Corporate Card,Employee Name\nAMEX-01,Jane Smith\nAMEX-02,John Doe\n").unwrap();
        let mapping = load_corporate_mapping(&path, None).unwrap();
        assert_eq!(mapping.lookup("Doe"), Some("AMEX-02 - John Doe"));
    }
}
