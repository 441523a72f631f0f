//! Derived reports over the application state. Read-only folds; nothing in
//! here mutates the books.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use campuserp_accounts::{AccountCategory, AccountCode, AccountLevel};
use campuserp_ledger::TransactionKind;
use campuserp_payroll::Employee;

use crate::state::AppState;

/// Billed vs received fees over a date range, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCollectionSummary {
    pub billed: i64,
    pub received: i64,
    pub outstanding: i64,
}

/// One ledger account's balance: opening plus posted movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub code: AccountCode,
    pub name: String,
    pub category: AccountCategory,
    pub balance: i64,
}

/// The front-page totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    pub students: usize,
    pub receivables: i64,
    pub stock_valuation: i64,
    pub monthly_payroll: i64,
}

impl AppState {
    /// Sum posted fee billing and fee receipts whose date falls in the range.
    pub fn fee_collection_summary(&self, from: NaiveDate, to: NaiveDate) -> FeeCollectionSummary {
        let mut billed = 0;
        let mut received = 0;
        for tx in self.transactions() {
            if !tx.is_posted() || tx.date < from || tx.date > to {
                continue;
            }
            match tx.kind {
                TransactionKind::FeeDue => billed += tx.amount,
                TransactionKind::FeeReceived | TransactionKind::Fee => received += tx.amount,
                TransactionKind::Journal | TransactionKind::Opening => {}
            }
        }
        FeeCollectionSummary {
            billed,
            received,
            outstanding: billed - received,
        }
    }

    /// Per-ledger balances: opening balance plus every posted debit and
    /// credit, signed by the account's category (debit-normal for assets and
    /// expenses, credit-normal otherwise).
    pub fn account_balances(&self) -> Vec<AccountBalance> {
        self.chart
            .accounts()
            .iter()
            .filter(|a| a.level == AccountLevel::Ledger)
            .map(|account| {
                let mut debits = 0;
                let mut credits = 0;
                for tx in self.transactions() {
                    if !tx.is_posted() {
                        continue;
                    }
                    if tx.debit_account == account.code {
                        debits += tx.amount;
                    }
                    if tx.credit_account == account.code {
                        credits += tx.amount;
                    }
                }
                let movement = match account.category {
                    AccountCategory::Asset | AccountCategory::Expense => debits - credits,
                    AccountCategory::Liability
                    | AccountCategory::Equity
                    | AccountCategory::Income => credits - debits,
                };
                AccountBalance {
                    code: account.code.clone(),
                    name: account.name.clone(),
                    category: account.category,
                    balance: account.opening_balance + movement,
                }
            })
            .collect()
    }

    pub fn dashboard_totals(&self) -> DashboardTotals {
        DashboardTotals {
            students: self.students.len(),
            receivables: self.students.iter().map(|s| s.balance).sum(),
            stock_valuation: self.inventory.valuation(),
            monthly_payroll: self.employees.iter().map(Employee::net_pay).sum(),
        }
    }
}
