//! amexclaim-core: cell/table types, column lookup, and error types shared by the claim pipeline

pub mod cell;
pub mod columns;
pub mod error;
pub mod table;

pub use cell::Cell;
pub use error::{ClaimError, Result};
pub use table::{normalize_column_name, Table};
