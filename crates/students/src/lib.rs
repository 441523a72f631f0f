//! Student records domain module.
//!
//! Biodata, per-student fee rates, the running fee balance, and cohort
//! filtering. Purely deterministic domain logic (no IO, no HTTP, no storage).

pub mod directory;
pub mod student;

pub use directory::{StudentDirectory, UpdateBiodata};
pub use student::{CohortFilter, FeeRates, Selector, Student};
