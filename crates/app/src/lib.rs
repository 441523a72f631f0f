//! `campuserp-app` — the application state container.
//!
//! One owned, in-memory [`AppState`] ties the domain crates together: the
//! chart of accounts, the student directory, the transaction list, the audit
//! trail, users, inventory, and payroll. Every mutation goes through a named
//! `&mut self` operation so balance effects and audit entries can never be
//! skipped by a caller poking at fields directly.

pub mod reports;
pub mod state;

pub use reports::{AccountBalance, DashboardTotals, FeeCollectionSummary};
pub use state::AppState;
