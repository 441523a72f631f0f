use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campuserp_core::Entity;

/// Employee identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One employee with monthly salary components, in the smallest currency
/// unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub designation: String,
    pub basic_salary: i64,
    pub allowances: i64,
    pub deductions: i64,
}

impl Employee {
    pub fn new(
        name: impl Into<String>,
        designation: impl Into<String>,
        basic_salary: i64,
    ) -> Self {
        Self {
            id: EmployeeId::new(),
            name: name.into(),
            designation: designation.into(),
            basic_salary,
            allowances: 0,
            deductions: 0,
        }
    }

    /// Net monthly pay; deductions cannot push it below zero.
    pub fn net_pay(&self) -> i64 {
        (self.basic_salary + self.allowances - self.deductions).max(0)
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_pay_sums_components() {
        let mut e = Employee::new("T. Ahmed", "Lecturer", 80_000);
        e.allowances = 12_000;
        e.deductions = 5_000;
        assert_eq!(e.net_pay(), 87_000);
    }

    #[test]
    fn net_pay_never_goes_negative() {
        let mut e = Employee::new("Part Timer", "Assistant", 10_000);
        e.deductions = 15_000;
        assert_eq!(e.net_pay(), 0);
    }
}
