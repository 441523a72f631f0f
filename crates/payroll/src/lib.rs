//! Payroll domain module: employees, salary arithmetic, and the monthly run.
//!
//! Purely deterministic domain logic; the resulting journal voucher draft is
//! posted by the application state.

pub mod employee;
pub mod run;

pub use employee::{Employee, EmployeeId};
pub use run::{run_payroll, PayrollLine, PayrollRun};
