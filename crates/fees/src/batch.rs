use chrono::NaiveDate;

use campuserp_accounts::AccountCode;
use campuserp_core::{DomainError, DomainResult};
use campuserp_ledger::{Transaction, TransactionKind};
use campuserp_students::Student;

use crate::schedule::{assess_fee, FeeHead, MonthRange};

/// The two ledger accounts a fee billing posts between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingAccounts {
    /// Debited by every billing: the receivable account.
    pub receivable: AccountCode,
    /// Credited by every billing: the fee income account.
    pub income: AccountCode,
}

/// Parameters of one batch fee generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBatchSpec {
    pub head: FeeHead,
    /// Strictly positive override used verbatim for every student.
    pub override_amount: Option<i64>,
    pub range: MonthRange,
    pub date: NaiveDate,
}

/// Generate the fee transactions for a filtered cohort.
///
/// Each student is assessed independently; students whose computed amount is
/// zero are excluded from the batch. An empty cohort or an all-zero batch is
/// rejected before anything is posted.
///
/// `next_voucher_no` is called once per kept student, in cohort order.
pub fn generate_fee_batch(
    cohort: &[&Student],
    spec: &FeeBatchSpec,
    accounts: &BillingAccounts,
    mut next_voucher_no: impl FnMut() -> String,
) -> DomainResult<Vec<Transaction>> {
    if cohort.is_empty() {
        tracing::warn!(head = %spec.head, "fee batch rejected, empty cohort");
        return Err(DomainError::validation("no students found for criteria"));
    }

    let mut transactions = Vec::new();
    for student in cohort {
        let amount = assess_fee(student, spec.head, spec.override_amount, spec.range);
        if amount == 0 {
            continue;
        }

        let details = format!(
            "{} {} to {}",
            spec.head,
            spec.range.from.name(),
            spec.range.to.name()
        );
        transactions.push(Transaction::new(
            next_voucher_no(),
            spec.date,
            TransactionKind::FeeDue,
            accounts.receivable.clone(),
            accounts.income.clone(),
            amount,
            Some(student.admission_no.clone()),
            details,
        )?);
    }

    if transactions.is_empty() {
        tracing::warn!(head = %spec.head, "fee batch rejected, nothing to bill");
        return Err(DomainError::validation("total amount is 0"));
    }

    tracing::info!(
        head = %spec.head,
        students = transactions.len(),
        total = transactions.iter().map(|t| t.amount).sum::<i64>(),
        "fee batch generated"
    );
    Ok(transactions)
}
