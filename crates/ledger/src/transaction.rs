use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use campuserp_accounts::AccountCode;
use campuserp_core::{AdmissionNo, DomainError, DomainResult, Entity, TransactionId};

/// Kind of a transaction.
///
/// The legacy records carried these as bare strings (`"FEE_DUE"`, `"FEE_RCV"`,
/// ...); the tagged variant keeps the serialized form but lets the statement
/// projector match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// A fee billed against a student (raises what they owe).
    #[serde(rename = "FEE_DUE")]
    FeeDue,
    /// A fee payment received from a student.
    #[serde(rename = "FEE_RCV")]
    FeeReceived,
    /// Legacy fee receipt kind, treated identically to `FeeReceived`.
    #[serde(rename = "FEE")]
    Fee,
    /// General journal voucher between two ledger accounts.
    #[serde(rename = "JV")]
    Journal,
    /// Opening balance carried into the books.
    #[serde(rename = "OB")]
    Opening,
}

/// Lifecycle state gating whether a transaction affects balances.
///
/// Only `Posted` transactions contribute to statements and student balances.
/// `DeletePending` marks a posted transaction awaiting delete approval; its
/// balance effect stays applied until the delete is confirmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[default]
    Posted,
    Pending,
    DeletePending,
}

/// One transaction in the books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub voucher_no: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub debit_account: AccountCode,
    pub credit_account: AccountCode,
    /// Amount in the smallest currency unit; never negative.
    pub amount: i64,
    pub status: TransactionStatus,
    pub student: Option<AdmissionNo>,
    pub details: String,
}

impl Transaction {
    /// Build a validated transaction. Amounts are non-negative, and a voucher
    /// cannot debit and credit the same account.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        voucher_no: impl Into<String>,
        date: NaiveDate,
        kind: TransactionKind,
        debit_account: AccountCode,
        credit_account: AccountCode,
        amount: i64,
        student: Option<AdmissionNo>,
        details: impl Into<String>,
    ) -> DomainResult<Self> {
        if amount < 0 {
            return Err(DomainError::validation("amount must be non-negative"));
        }
        if debit_account == credit_account {
            return Err(DomainError::validation(
                "debit and credit account must differ",
            ));
        }
        Ok(Self {
            id: TransactionId::new(),
            voucher_no: voucher_no.into(),
            date,
            kind,
            debit_account,
            credit_account,
            amount,
            status: TransactionStatus::Posted,
            student,
            details: details.into(),
        })
    }

    /// Same as [`Transaction::new`] but left in `Pending` until approved.
    #[allow(clippy::too_many_arguments)]
    pub fn new_pending(
        voucher_no: impl Into<String>,
        date: NaiveDate,
        kind: TransactionKind,
        debit_account: AccountCode,
        credit_account: AccountCode,
        amount: i64,
        student: Option<AdmissionNo>,
        details: impl Into<String>,
    ) -> DomainResult<Self> {
        let mut tx = Self::new(
            voucher_no,
            date,
            kind,
            debit_account,
            credit_account,
            amount,
            student,
            details,
        )?;
        tx.status = TransactionStatus::Pending;
        Ok(tx)
    }

    pub fn is_posted(&self) -> bool {
        self.status == TransactionStatus::Posted
    }

    /// Whether the transaction's balance effect currently stands.
    ///
    /// A delete-pending transaction stays applied until the delete is
    /// confirmed; statements, however, show strictly posted rows.
    pub fn affects_balance(&self) -> bool {
        matches!(
            self.status,
            TransactionStatus::Posted | TransactionStatus::DeletePending
        )
    }

    pub fn belongs_to(&self, admission_no: &AdmissionNo) -> bool {
        self.student.as_ref() == Some(admission_no)
    }

    /// Approve a pending transaction, posting it.
    pub fn approve(&mut self) -> DomainResult<()> {
        match self.status {
            TransactionStatus::Pending => {
                self.status = TransactionStatus::Posted;
                Ok(())
            }
            _ => Err(DomainError::invariant(format!(
                "voucher {} is not pending approval",
                self.voucher_no
            ))),
        }
    }

    /// Flag a posted transaction for deletion; the caller confirms later.
    pub fn request_delete(&mut self) -> DomainResult<()> {
        match self.status {
            TransactionStatus::Posted => {
                self.status = TransactionStatus::DeletePending;
                Ok(())
            }
            _ => Err(DomainError::invariant(format!(
                "voucher {} is not posted",
                self.voucher_no
            ))),
        }
    }

    /// Take a delete-pending transaction back to posted.
    pub fn cancel_delete(&mut self) -> DomainResult<()> {
        match self.status {
            TransactionStatus::DeletePending => {
                self.status = TransactionStatus::Posted;
                Ok(())
            }
            _ => Err(DomainError::invariant(format!(
                "voucher {} has no delete pending",
                self.voucher_no
            ))),
        }
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
