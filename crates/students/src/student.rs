use serde::{Deserialize, Serialize};

use campuserp_core::{AdmissionNo, Entity};

/// Per-student fee rates, in the smallest currency unit.
///
/// `tuition_fee` is the rate for a whole semester; the fee calculator divides
/// it over the six months a semester covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRates {
    pub tuition_fee: i64,
    pub admission_fee: i64,
    pub exam_fee: i64,
    pub library_fee: i64,
    pub transport_fee: i64,
}

/// One student record.
///
/// `balance` is the running fee balance (billed minus paid); it is mutated
/// only through [`Student::apply_debit`] / [`Student::apply_credit`] when a
/// posted transaction affects the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub admission_no: AdmissionNo,
    pub name: String,
    pub father_name: String,
    pub program: String,
    pub semester: String,
    pub campus: String,
    pub board: String,
    pub balance: i64,
    #[serde(flatten)]
    pub rates: FeeRates,
}

impl Student {
    pub fn new(admission_no: AdmissionNo, name: impl Into<String>) -> Self {
        Self {
            admission_no,
            name: name.into(),
            father_name: String::new(),
            program: String::new(),
            semester: String::new(),
            campus: String::new(),
            board: String::new(),
            balance: 0,
            rates: FeeRates::default(),
        }
    }

    /// A billing against the student increases what they owe.
    pub fn apply_debit(&mut self, amount: i64) {
        self.balance += amount;
    }

    /// A payment (or reversal of a billing) decreases what they owe.
    pub fn apply_credit(&mut self, amount: i64) {
        self.balance -= amount;
    }
}

impl Entity for Student {
    type Id = AdmissionNo;

    fn id(&self) -> &Self::Id {
        &self.admission_no
    }
}

/// One axis of a cohort filter: match everything or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    pub fn only(value: impl Into<String>) -> Self {
        Self::Only(value.into())
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }
}

/// Cohort filter used by batch billing and reports: campus, board, program
/// and semester, each either "All" or an exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortFilter {
    pub campus: Selector,
    pub board: Selector,
    pub program: Selector,
    pub semester: Selector,
}

impl CohortFilter {
    pub fn matches(&self, student: &Student) -> bool {
        self.campus.matches(&student.campus)
            && self.board.matches(&student.board)
            && self.program.matches(&student.program)
            && self.semester.matches(&student.semester)
    }
}
