//! amexclaim-ingest: statement/template/mapping file readers and header detection.

pub mod format;
pub mod readers;
pub mod statement;
pub mod tabular;

pub use format::{detect_format, SourceFormat};
pub use readers::{read_raw_grid, RawGrid};
pub use statement::{detect_header_row, load_statement, LoadedStatement};
pub use tabular::{load_table, read_header_row};
