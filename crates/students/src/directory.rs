use serde::{Deserialize, Serialize};

use campuserp_core::{AdmissionNo, DomainError, DomainResult};

use crate::student::{CohortFilter, FeeRates, Student};

/// Biodata update: `None` fields keep their existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBiodata {
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub program: Option<String>,
    pub semester: Option<String>,
    pub campus: Option<String>,
    pub board: Option<String>,
    pub rates: Option<FeeRates>,
}

/// All student records, keyed by admission number.
///
/// Insertion order is preserved; listings and batch billing walk students in
/// the order they were registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDirectory {
    students: Vec<Student>,
}

impl StudentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    pub fn get(&self, admission_no: &AdmissionNo) -> Option<&Student> {
        self.students.iter().find(|s| &s.admission_no == admission_no)
    }

    pub fn get_mut(&mut self, admission_no: &AdmissionNo) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| &s.admission_no == admission_no)
    }

    /// Register a new student. Admission numbers are unique.
    pub fn register(&mut self, student: Student) -> DomainResult<()> {
        if self.get(&student.admission_no).is_some() {
            return Err(DomainError::conflict(format!(
                "admission no '{}' already registered",
                student.admission_no
            )));
        }
        tracing::info!(admission_no = %student.admission_no, name = %student.name, "student registered");
        self.students.push(student);
        Ok(())
    }

    /// Apply a partial biodata update to an existing student.
    pub fn update(&mut self, admission_no: &AdmissionNo, update: UpdateBiodata) -> DomainResult<()> {
        let student = self.get_mut(admission_no).ok_or(DomainError::NotFound)?;

        if let Some(name) = update.name {
            student.name = name;
        }
        if let Some(father_name) = update.father_name {
            student.father_name = father_name;
        }
        if let Some(program) = update.program {
            student.program = program;
        }
        if let Some(semester) = update.semester {
            student.semester = semester;
        }
        if let Some(campus) = update.campus {
            student.campus = campus;
        }
        if let Some(board) = update.board {
            student.board = board;
        }
        if let Some(rates) = update.rates {
            student.rates = rates;
        }
        Ok(())
    }

    /// Remove a student record, returning it.
    pub fn remove(&mut self, admission_no: &AdmissionNo) -> DomainResult<Student> {
        let idx = self
            .students
            .iter()
            .position(|s| &s.admission_no == admission_no)
            .ok_or(DomainError::NotFound)?;
        Ok(self.students.remove(idx))
    }

    /// Students matching a cohort filter, in registration order.
    pub fn cohort(&self, filter: &CohortFilter) -> Vec<&Student> {
        self.students.iter().filter(|s| filter.matches(s)).collect()
    }
}
