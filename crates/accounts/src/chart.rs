use serde::{Deserialize, Serialize};

use campuserp_core::{DomainError, DomainResult, Entity};

use crate::code::AccountCode;

/// Fixed well-known ledger codes seeded into every chart.
///
/// The receivable code is load-bearing: the statement projector classifies a
/// transaction as billing or payment by whether it debits or credits this
/// account.
pub const ACCOUNTS_RECEIVABLE_CODE: &str = "1-01-001";
pub const CASH_IN_HAND_CODE: &str = "1-01-000";
pub const FEE_INCOME_CODE: &str = "4-01-000";
pub const SALARIES_EXPENSE_CODE: &str = "5-01-000";

/// Level of an account in the three-tier chart.
///
/// The level always equals the number of segments in the account's code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountLevel {
    Group,
    Control,
    Ledger,
}

impl AccountLevel {
    pub fn as_depth(self) -> usize {
        match self {
            AccountLevel::Group => 1,
            AccountLevel::Control => 2,
            AccountLevel::Ledger => 3,
        }
    }
}

/// High-level account category (determines reporting side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    Asset,
    Liability,
    Equity,
    Income,
    Expense,
}

/// One account in the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub code: AccountCode,
    pub name: String,
    pub level: AccountLevel,
    pub parent: Option<AccountCode>,
    pub category: AccountCategory,
    /// Opening balance in the smallest currency unit. Only ledger-level
    /// accounts carry one; it is zero for groups and controls.
    pub opening_balance: i64,
}

impl Entity for Account {
    type Id = AccountCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}

/// The chart of accounts: an ordered collection of accounts with hierarchy
/// invariants enforced on insert.
///
/// # Invariants
/// - Account codes are unique.
/// - An account's level equals the segment depth of its code.
/// - Every non-group account names a parent that already exists, sits exactly
///   one level above, and is the code's own prefix.
/// - Only ledger accounts carry a non-zero opening balance.
///
/// Insertion order is preserved; the code allocator depends on it (the "last
/// sibling" is the most recently added child).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOfAccounts {
    accounts: Vec<Account>,
}

impl ChartOfAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chart pre-seeded with the well-known school accounts: cash,
    /// accounts receivable, and the fee income ledgers.
    pub fn with_defaults() -> Self {
        let mut chart = Self::new();

        let seed: &[(&str, &str, AccountLevel, AccountCategory, i64)] = &[
            ("1", "Assets", AccountLevel::Group, AccountCategory::Asset, 0),
            ("1-01", "Current Assets", AccountLevel::Control, AccountCategory::Asset, 0),
            (CASH_IN_HAND_CODE, "Cash in Hand", AccountLevel::Ledger, AccountCategory::Asset, 0),
            (ACCOUNTS_RECEIVABLE_CODE, "Accounts Receivable", AccountLevel::Ledger, AccountCategory::Asset, 0),
            ("4", "Income", AccountLevel::Group, AccountCategory::Income, 0),
            ("4-01", "Fee Income", AccountLevel::Control, AccountCategory::Income, 0),
            (FEE_INCOME_CODE, "Tuition Fee Income", AccountLevel::Ledger, AccountCategory::Income, 0),
            ("4-01-001", "Admission Fee Income", AccountLevel::Ledger, AccountCategory::Income, 0),
            ("5", "Expenses", AccountLevel::Group, AccountCategory::Expense, 0),
            ("5-01", "Operating Expenses", AccountLevel::Control, AccountCategory::Expense, 0),
            (SALARIES_EXPENSE_CODE, "Salaries Expense", AccountLevel::Ledger, AccountCategory::Expense, 0),
        ];

        for (code, name, level, category, opening) in seed {
            let code = AccountCode::parse(*code).expect("seed codes are well formed");
            let parent = code.parent();
            chart
                .add(Account {
                    code,
                    name: (*name).to_string(),
                    level: *level,
                    parent,
                    category: *category,
                    opening_balance: *opening,
                })
                .expect("seed accounts satisfy chart invariants");
        }

        chart
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, code: &AccountCode) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.code == code)
    }

    pub fn contains(&self, code: &AccountCode) -> bool {
        self.get(code).is_some()
    }

    /// Ledger accounts belonging to a category (for reporting).
    pub fn ledgers_in(&self, category: AccountCategory) -> impl Iterator<Item = &Account> {
        self.accounts
            .iter()
            .filter(move |a| a.level == AccountLevel::Ledger && a.category == category)
    }

    /// Direct children of `parent`, in insertion order.
    pub fn children_of<'a>(&'a self, parent: &'a AccountCode) -> impl Iterator<Item = &'a Account> {
        self.accounts
            .iter()
            .filter(move |a| a.parent.as_ref() == Some(parent))
    }

    /// Add an account, enforcing every chart invariant.
    pub fn add(&mut self, account: Account) -> DomainResult<()> {
        if self.contains(&account.code) {
            return Err(DomainError::conflict(format!(
                "account code '{}' already exists",
                account.code
            )));
        }

        if account.code.depth() != account.level.as_depth() {
            return Err(DomainError::invariant(format!(
                "code '{}' has depth {}, expected {} for its level",
                account.code,
                account.code.depth(),
                account.level.as_depth()
            )));
        }

        match (&account.level, &account.parent) {
            (AccountLevel::Group, None) => {}
            (AccountLevel::Group, Some(_)) => {
                return Err(DomainError::invariant("group accounts have no parent"));
            }
            (_, None) => {
                return Err(DomainError::invariant(format!(
                    "account '{}' requires a parent",
                    account.code
                )));
            }
            (_, Some(parent)) => {
                let Some(existing) = self.get(parent) else {
                    return Err(DomainError::validation(format!(
                        "parent account '{parent}' does not exist"
                    )));
                };
                if existing.level.as_depth() + 1 != account.level.as_depth() {
                    return Err(DomainError::invariant(format!(
                        "parent '{parent}' is not one level above '{}'",
                        account.code
                    )));
                }
                if account.code.parent().as_ref() != Some(parent) {
                    return Err(DomainError::invariant(format!(
                        "code '{}' is not nested under its parent '{parent}'",
                        account.code
                    )));
                }
            }
        }

        if account.level != AccountLevel::Ledger && account.opening_balance != 0 {
            return Err(DomainError::invariant(
                "only ledger accounts carry an opening balance",
            ));
        }

        tracing::debug!(code = %account.code, name = %account.name, "account added to chart");
        self.accounts.push(account);
        Ok(())
    }

    /// Allocate the next unused child code under `parent`.
    ///
    /// The first child is `{parent}-000`; afterwards the last sibling's
    /// trailing segment is incremented and re-padded. A last sibling whose
    /// trailing segment is not numeric is rejected outright rather than
    /// producing a garbage code.
    pub fn next_child_code(&self, parent: &AccountCode) -> DomainResult<AccountCode> {
        if !self.contains(parent) {
            return Err(DomainError::not_found());
        }

        let Some(last) = self.children_of(parent).last() else {
            return Ok(parent.child(0));
        };

        match last.code.trailing_number() {
            Some(n) => Ok(parent.child(n + 1)),
            None => Err(DomainError::validation(format!(
                "cannot allocate after sibling '{}': trailing segment is not numeric",
                last.code
            ))),
        }
    }
}
