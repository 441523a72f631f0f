//! Transactions, statement projection, and the audit trail.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. The
//! transaction list itself is owned by the application state; this crate
//! defines the types, the status lifecycle, and the fold that turns a
//! transaction history into a student statement.

pub mod audit;
pub mod statement;
pub mod transaction;

pub use audit::{AuditAction, AuditLog, AuditLogEntry};
pub use statement::{classify, project_statement, Side, StatementRow, StudentStatement};
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
