use chrono::Month;
use serde::{Deserialize, Serialize};

use campuserp_core::{DomainError, DomainResult};

use crate::employee::{Employee, EmployeeId};

/// One employee's line in a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollLine {
    pub employee_id: EmployeeId,
    pub name: String,
    pub net_pay: i64,
}

/// A computed monthly payroll run.
///
/// This is a draft: nothing is paid or posted here. The application turns
/// the total into a salary expense journal voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// 1-12; the salary month the run covers.
    pub month: u32,
    pub lines: Vec<PayrollLine>,
    pub total: i64,
}

/// Compute the payroll run for a month over the whole employee list.
///
/// Zero-pay employees are kept in the run (their line documents the zero);
/// an empty employee list is rejected.
pub fn run_payroll(employees: &[Employee], month: Month) -> DomainResult<PayrollRun> {
    if employees.is_empty() {
        return Err(DomainError::validation("no employees on the payroll"));
    }

    let lines: Vec<PayrollLine> = employees
        .iter()
        .map(|e| PayrollLine {
            employee_id: e.id,
            name: e.name.clone(),
            net_pay: e.net_pay(),
        })
        .collect();
    let total = lines.iter().map(|l| l.net_pay).sum();

    tracing::info!(month = month.name(), employees = lines.len(), total, "payroll computed");
    Ok(PayrollRun {
        month: month.number_from_month(),
        lines,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_across_employees() {
        let mut a = Employee::new("A", "Lecturer", 80_000);
        a.allowances = 10_000;
        let b = Employee::new("B", "Clerk", 35_000);

        let run = run_payroll(&[a, b], Month::March).unwrap();
        assert_eq!(run.month, 3);
        assert_eq!(run.lines.len(), 2);
        assert_eq!(run.total, 125_000);
    }

    #[test]
    fn empty_payroll_is_rejected() {
        assert!(run_payroll(&[], Month::March).is_err());
    }
}
