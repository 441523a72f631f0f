//! Statement projection: fold a student's transaction history into an
//! ordered statement with a running balance and totals.
//!
//! The projection is a pure function of its inputs; re-running it on an
//! unchanged history yields an identical statement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use campuserp_accounts::AccountCode;
use campuserp_core::{AdmissionNo, TransactionId};

use crate::transaction::{Transaction, TransactionKind};

/// Which side of the statement a transaction lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Debit,
    Credit,
    /// No contribution; the row is shown but the balance carries through.
    Neither,
}

/// One row of a student statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementRow {
    pub transaction_id: TransactionId,
    pub voucher_no: String,
    pub date: NaiveDate,
    pub details: String,
    pub debit: i64,
    pub credit: i64,
    /// Cumulative debits minus credits up to and including this row.
    pub balance: i64,
}

/// A projected student statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStatement {
    pub admission_no: AdmissionNo,
    pub rows: Vec<StatementRow>,
    pub total_billed: i64,
    pub total_paid: i64,
    /// `total_billed - total_paid`; equals the final running balance when
    /// the full history is projected.
    pub current_balance: i64,
}

/// Classify a transaction against the receivable account.
///
/// Precedence is fixed: the receivable side of the voucher wins over the
/// transaction kind, and only fee kinds contribute when neither side touches
/// the receivable account.
pub fn classify(tx: &Transaction, receivable: &AccountCode) -> Side {
    if &tx.debit_account == receivable {
        Side::Debit
    } else if &tx.credit_account == receivable {
        Side::Credit
    } else {
        match tx.kind {
            TransactionKind::FeeDue => Side::Debit,
            TransactionKind::FeeReceived | TransactionKind::Fee => Side::Credit,
            TransactionKind::Journal | TransactionKind::Opening => Side::Neither,
        }
    }
}

/// Project the statement for one student out of the full transaction list.
///
/// Keeps the student's posted transactions, orders them by date (id as a
/// tie-break; ids are time-ordered), and folds a running balance.
pub fn project_statement(
    transactions: &[Transaction],
    admission_no: &AdmissionNo,
    receivable: &AccountCode,
) -> StudentStatement {
    let mut relevant: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| tx.belongs_to(admission_no) && tx.is_posted())
        .collect();
    relevant.sort_by_key(|tx| (tx.date, tx.id));

    let mut rows = Vec::with_capacity(relevant.len());
    let mut total_billed: i64 = 0;
    let mut total_paid: i64 = 0;
    let mut balance: i64 = 0;

    for tx in relevant {
        let (debit, credit) = match classify(tx, receivable) {
            Side::Debit => (tx.amount, 0),
            Side::Credit => (0, tx.amount),
            Side::Neither => (0, 0),
        };

        total_billed += debit;
        total_paid += credit;
        balance += debit - credit;

        rows.push(StatementRow {
            transaction_id: tx.id,
            voucher_no: tx.voucher_no.clone(),
            date: tx.date,
            details: tx.details.clone(),
            debit,
            credit,
            balance,
        });
    }

    StudentStatement {
        admission_no: admission_no.clone(),
        rows,
        total_billed,
        total_paid,
        current_balance: total_billed - total_paid,
    }
}
