//! Data import: CSV/text parsing with header-based routing, plus the legacy
//! non-CSV entry points (`.bak` simulated restore, placeholder
//! acknowledgements for spreadsheet/PDF/Access files).
//!
//! Rows are parsed into typed records up front; a missing required field is a
//! structured error naming the row and field, never a silently defaulted
//! value.

pub mod error;
pub mod rows;
pub mod source;

pub use error::{ImportError, Result};
pub use rows::{parse_rows, AccountRow, ParsedRows, StudentRow};
pub use source::{import_bytes, ImportOutcome};
