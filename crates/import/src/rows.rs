//! CSV row parsing and header-based routing.
//!
//! A row set is classified as student data when the header row contains an
//! `admissionNo` column, otherwise as account data. Headers use the legacy
//! camelCase column names.

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};

/// A parsed student row. Strings stay untyped here; building a domain
/// `Student` (and rejecting duplicates) is the application's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRow {
    pub admission_no: String,
    pub name: String,
    pub father_name: Option<String>,
    pub program: Option<String>,
    pub semester: Option<String>,
    pub campus: Option<String>,
    pub board: Option<String>,
    pub tuition_fee: i64,
    pub admission_fee: i64,
}

/// A parsed account row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRow {
    pub code: String,
    pub name: String,
    pub category: Option<String>,
    pub opening_balance: i64,
}

/// Rows routed by header shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParsedRows {
    Students(Vec<StudentRow>),
    Accounts(Vec<AccountRow>),
}

/// Column accessor bound to one header row.
struct Columns {
    headers: StringRecord,
}

impl Columns {
    fn new(headers: StringRecord) -> Self {
        Self { headers }
    }

    fn contains(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h.trim() == name)
    }

    fn get<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
        let idx = self.headers.iter().position(|h| h.trim() == name)?;
        record.get(idx).map(str::trim).filter(|v| !v.is_empty())
    }

    fn required<'r>(&self, record: &'r StringRecord, name: &str, row: usize) -> Result<&'r str> {
        self.get(record, name).ok_or_else(|| ImportError::MissingField {
            row,
            field: name.to_string(),
        })
    }

    fn amount(&self, record: &StringRecord, name: &str, row: usize) -> Result<i64> {
        match self.get(record, name) {
            None => Ok(0),
            Some(raw) => raw.parse().map_err(|e| ImportError::InvalidField {
                row,
                field: name.to_string(),
                message: format!("{e}"),
            }),
        }
    }
}

/// Parse comma-delimited text with a header row into typed, routed rows.
pub fn parse_rows(text: &str) -> Result<ParsedRows> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let columns = Columns::new(rdr.headers()?.clone());

    if columns.contains("admissionNo") {
        let mut students = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record?;
            let row = idx + 1; // 1-based data row, header not counted
            students.push(StudentRow {
                admission_no: columns.required(&record, "admissionNo", row)?.to_string(),
                name: columns.required(&record, "name", row)?.to_string(),
                father_name: columns.get(&record, "fatherName").map(String::from),
                program: columns.get(&record, "program").map(String::from),
                semester: columns.get(&record, "semester").map(String::from),
                campus: columns.get(&record, "campus").map(String::from),
                board: columns.get(&record, "board").map(String::from),
                tuition_fee: columns.amount(&record, "tuitionFee", row)?,
                admission_fee: columns.amount(&record, "admissionFee", row)?,
            });
        }
        tracing::info!(rows = students.len(), "parsed student import rows");
        Ok(ParsedRows::Students(students))
    } else {
        let mut accounts = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record?;
            let row = idx + 1;
            accounts.push(AccountRow {
                code: columns.required(&record, "code", row)?.to_string(),
                name: columns.required(&record, "name", row)?.to_string(),
                category: columns.get(&record, "category").map(String::from),
                opening_balance: columns.amount(&record, "openingBalance", row)?,
            });
        }
        tracing::info!(rows = accounts.len(), "parsed account import rows");
        Ok(ParsedRows::Accounts(accounts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_by_admission_no_header() {
        let parsed = parse_rows("admissionNo,name\nA-1023,Ali Khan\n").unwrap();
        match parsed {
            ParsedRows::Students(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].admission_no, "A-1023");
                assert_eq!(rows[0].name, "Ali Khan");
            }
            ParsedRows::Accounts(_) => panic!("student header routed to accounts"),
        }
    }

    #[test]
    fn header_without_admission_no_routes_to_accounts() {
        let parsed = parse_rows("code,name,openingBalance\n1-01-002,Bank,1500\n").unwrap();
        match parsed {
            ParsedRows::Accounts(rows) => {
                assert_eq!(rows[0].code, "1-01-002");
                assert_eq!(rows[0].opening_balance, 1_500);
            }
            ParsedRows::Students(_) => panic!("account header routed to students"),
        }
    }

    #[test]
    fn missing_required_field_names_row_and_field() {
        let err = parse_rows("admissionNo,name\nA-1023,\n").unwrap_err();
        match err {
            ImportError::MissingField { row, field } => {
                assert_eq!(row, 1);
                assert_eq!(field, "name");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn malformed_amount_is_a_structured_error() {
        let err =
            parse_rows("admissionNo,name,tuitionFee\nA-1,Ali,sixty-thousand\n").unwrap_err();
        assert!(matches!(err, ImportError::InvalidField { row: 1, .. }));
    }

    #[test]
    fn optional_fields_default_sensibly() {
        let parsed = parse_rows("admissionNo,name,program\nA-1,Ali,BSCS\n").unwrap();
        let ParsedRows::Students(rows) = parsed else {
            panic!("expected students");
        };
        assert_eq!(rows[0].program.as_deref(), Some("BSCS"));
        assert_eq!(rows[0].campus, None);
        assert_eq!(rows[0].tuition_fee, 0);
    }

    #[test]
    fn quoted_commas_stay_in_one_field() {
        let parsed = parse_rows("admissionNo,name\nA-1,\"Khan, Ali\"\n").unwrap();
        let ParsedRows::Students(rows) = parsed else {
            panic!("expected students");
        };
        assert_eq!(rows[0].name, "Khan, Ali");
    }
}
