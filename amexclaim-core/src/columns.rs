//! Well-known column names and literal values of the AMEX corporate statement
//! and the expense-claim import layout.

pub const TRANSACTION_AMOUNT_COLUMN: &str = "Transaction Amount USD";
pub const TRANSACTION_DATE_COLUMN: &str = "Transaction Date";
pub const DESCRIPTION_SOURCE_COLUMN: &str = "Transaction Description 1";
/// Free-text field whose digits are stripped and used as the claim reference.
pub const REFERENCE_SOURCE_COLUMN: &str = "Transaction Description 4";
pub const GROUP_COLUMN: &str = "Supplemental Cardmember Last Name";

/// Compact, lower-cased marker that identifies the statement header row.
pub const HEADER_MARKER: &str = "transactionamount";
pub const HEADER_SCAN_LIMIT: usize = 100;

pub const BRANCH: &str = "Branch";
pub const DATE: &str = "Date";
pub const REF_NBR: &str = "Ref. Nbr.";
pub const DESCRIPTION: &str = "Description";
pub const AMOUNT: &str = "Amount";
pub const CLAIM_AMOUNT: &str = "Claim Amount";
pub const PAID_WITH: &str = "Paid With";
pub const CORPORATE_CARD: &str = "Corporate Card";

pub const DEFAULT_TEMPLATE_COLUMNS: [&str; 11] = [
    BRANCH,
    DATE,
    REF_NBR,
    "Expense Item",
    "Expense Account",
    DESCRIPTION,
    AMOUNT,
    CLAIM_AMOUNT,
    PAID_WITH,
    CORPORATE_CARD,
    "AR Reference Nbr.",
];

pub const DEFAULT_PAID_WITH: &str = "Corporate Card, Company Expense";
pub const DEFAULT_BRANCH: &str = "KEC";
pub const NOT_ASSIGNED: &str = "Not Assigned";

pub const CLAIM_FILE_SUFFIX: &str = "_AMEX_Claim";
