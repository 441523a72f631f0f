//! Chart of accounts domain module.
//!
//! Pure domain logic only: hierarchical account codes, the three-level chart
//! (group / control / ledger), and sequential child-code allocation. No IO,
//! no HTTP, no persistence concerns.

pub mod chart;
pub mod code;

pub use chart::{
    Account, AccountCategory, AccountLevel, ChartOfAccounts, ACCOUNTS_RECEIVABLE_CODE,
    CASH_IN_HAND_CODE, FEE_INCOME_CODE, SALARIES_EXPENSE_CODE,
};
pub use code::AccountCode;
