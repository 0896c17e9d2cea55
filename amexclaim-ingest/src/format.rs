use amexclaim_core::{ClaimError, Result};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    /// Tab-delimited text
    Txt,
    Xlsx,
    Xls,
    Json,
}

impl SourceFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "txt" => Some(Self::Txt),
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn is_excel(self) -> bool {
        matches!(self, Self::Xlsx | Self::Xls)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ext = match self {
            Self::Csv => ".csv",
            Self::Txt => ".txt",
            Self::Xlsx => ".xlsx",
            Self::Xls => ".xls",
            Self::Json => ".json",
        };
        f.write_str(ext)
    }
}

/// Determine the format from the path's extension, or from `file_name` when the
/// path carries none (uploads saved under temporary names).
pub fn detect_format(path: &Path, file_name: Option<&str>) -> Result<SourceFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .or_else(|| file_name.and_then(|n| Path::new(n).extension()).and_then(|e| e.to_str()));

    let Some(ext) = ext else {
        return Err(ClaimError::UnsupportedFormat(format!(
            "cannot determine file type for {}",
            path.display()
        )));
    };

    SourceFormat::from_extension(ext)
        .ok_or_else(|| ClaimError::UnsupportedFormat(format!(".{}", ext.to_ascii_lowercase())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(detect_format(Path::new("a/Statement.XLSX"), None).unwrap(), SourceFormat::Xlsx);
        assert_eq!(detect_format(Path::new("s.txt"), None).unwrap(), SourceFormat::Txt);
    }

    #[test]
    fn test_is_excel() {
        assert!(SourceFormat::Xls.is_excel());
        assert!(SourceFormat::Xlsx.is_excel());
        assert!(!SourceFormat::Txt.is_excel());
        assert!(!SourceFormat::Json.is_excel());
    }

    #[test]
    fn test_file_name_fallback() {
        let fmt = detect_format(Path::new("/tmp/upload-1234"), Some("march.csv")).unwrap();
        assert_eq!(fmt, SourceFormat::Csv);
    }

    #[test]
    fn test_unsupported() {
        assert!(matches!(
            detect_format(Path::new("statement.pdf"), None),
            Err(ClaimError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format(Path::new("statement"), None),
            Err(ClaimError::UnsupportedFormat(_))
        ));
    }
}
