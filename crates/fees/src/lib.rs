//! Fee billing: the per-student fee calculator and batch fee generation.
//!
//! Pure domain logic only; posting the generated transactions (and the
//! student balance effects) is the application state's job.

pub mod batch;
pub mod schedule;

pub use batch::{generate_fee_batch, BillingAccounts, FeeBatchSpec};
pub use schedule::{assess_fee, month_count, parse_month, FeeHead, MonthRange, TUITION_MONTHS_PER_SEMESTER};
