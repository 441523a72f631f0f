use chrono::{Month, NaiveDate};

use campuserp_accounts::{
    Account, AccountCategory, AccountCode, AccountLevel, ChartOfAccounts,
    ACCOUNTS_RECEIVABLE_CODE, CASH_IN_HAND_CODE, FEE_INCOME_CODE, SALARIES_EXPENSE_CODE,
};
use campuserp_auth::{authenticate, MenuItem, MenuTree, Principal, User};
use campuserp_core::{AdmissionNo, DomainError, DomainResult};
use campuserp_fees::{generate_fee_batch, BillingAccounts, FeeBatchSpec};
use campuserp_import::{import_bytes, AccountRow, ImportOutcome, ParsedRows, StudentRow};
use campuserp_inventory::StockRegister;
use campuserp_ledger::{
    classify, project_statement, AuditAction, AuditLog, Side, StudentStatement, Transaction,
    TransactionKind, TransactionStatus,
};
use campuserp_payroll::{run_payroll, Employee, PayrollRun};
use campuserp_students::{CohortFilter, FeeRates, Student, StudentDirectory, UpdateBiodata};

/// The whole application state, owned in one place.
///
/// Transactions and the audit trail are private: posting, approving, editing
/// and deleting all carry a student balance effect or an audit entry, and the
/// named operations here are the only way to get one without the other.
#[derive(Debug, Clone)]
pub struct AppState {
    pub chart: ChartOfAccounts,
    pub students: StudentDirectory,
    pub users: Vec<User>,
    pub inventory: StockRegister,
    pub employees: Vec<Employee>,
    transactions: Vec<Transaction>,
    audit: AuditLog,
    menu: MenuTree,
    billing: BillingAccounts,
    cash: AccountCode,
    salaries_expense: AccountCode,
    voucher_seq: u32,
}

fn level_for_depth(depth: usize) -> DomainResult<AccountLevel> {
    match depth {
        1 => Ok(AccountLevel::Group),
        2 => Ok(AccountLevel::Control),
        3 => Ok(AccountLevel::Ledger),
        _ => Err(DomainError::validation(
            "account codes are at most three levels deep",
        )),
    }
}

fn category_for_row(row: &AccountRow, code: &AccountCode) -> DomainResult<AccountCategory> {
    if let Some(raw) = &row.category {
        return match raw.to_ascii_lowercase().as_str() {
            "asset" => Ok(AccountCategory::Asset),
            "liability" => Ok(AccountCategory::Liability),
            "equity" => Ok(AccountCategory::Equity),
            "income" => Ok(AccountCategory::Income),
            "expense" => Ok(AccountCategory::Expense),
            other => Err(DomainError::validation(format!(
                "unknown account category '{other}'"
            ))),
        };
    }
    // No category column: infer from the leading group segment the way the
    // legacy chart numbered its groups.
    match code.segments().next() {
        Some("1") => Ok(AccountCategory::Asset),
        Some("2") => Ok(AccountCategory::Liability),
        Some("3") => Ok(AccountCategory::Equity),
        Some("4") => Ok(AccountCategory::Income),
        Some("5") => Ok(AccountCategory::Expense),
        _ => Err(DomainError::validation(format!(
            "cannot infer a category for account '{code}'"
        ))),
    }
}

impl AppState {
    /// Fresh state with the seeded chart of accounts, the default menu tree,
    /// and nothing else.
    pub fn new() -> Self {
        let well_known =
            |code: &str| AccountCode::parse(code).expect("seed codes are well formed");
        Self {
            chart: ChartOfAccounts::with_defaults(),
            students: StudentDirectory::new(),
            users: Vec::new(),
            inventory: StockRegister::new(),
            employees: Vec::new(),
            transactions: Vec::new(),
            audit: AuditLog::new(),
            menu: MenuTree::school_default(),
            billing: BillingAccounts {
                receivable: well_known(ACCOUNTS_RECEIVABLE_CODE),
                income: well_known(FEE_INCOME_CODE),
            },
            cash: well_known(CASH_IN_HAND_CODE),
            salaries_expense: well_known(SALARIES_EXPENSE_CODE),
            voucher_seq: 0,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    fn next_voucher(&mut self, prefix: &str) -> String {
        self.voucher_seq += 1;
        format!("{prefix}-{:04}", self.voucher_seq)
    }

    fn position(&self, voucher_no: &str) -> DomainResult<usize> {
        self.transactions
            .iter()
            .position(|t| t.voucher_no == voucher_no)
            .ok_or(DomainError::NotFound)
    }

    /// Apply a transaction's effect to the student balance it belongs to.
    fn apply_balance_effect(&mut self, tx: &Transaction) {
        let Some(admission_no) = tx.student.clone() else {
            return;
        };
        let side = classify(tx, &self.billing.receivable);
        if let Some(student) = self.students.get_mut(&admission_no) {
            match side {
                Side::Debit => student.apply_debit(tx.amount),
                Side::Credit => student.apply_credit(tx.amount),
                Side::Neither => {}
            }
        }
    }

    fn reverse_balance_effect(&mut self, tx: &Transaction) {
        let Some(admission_no) = tx.student.clone() else {
            return;
        };
        let side = classify(tx, &self.billing.receivable);
        if let Some(student) = self.students.get_mut(&admission_no) {
            match side {
                Side::Debit => student.apply_credit(tx.amount),
                Side::Credit => student.apply_debit(tx.amount),
                Side::Neither => {}
            }
        }
    }

    // ---- students -------------------------------------------------------

    pub fn register_student(&mut self, student: Student) -> DomainResult<()> {
        self.students.register(student)
    }

    pub fn update_student(
        &mut self,
        admission_no: &AdmissionNo,
        update: UpdateBiodata,
    ) -> DomainResult<()> {
        self.students.update(admission_no, update)
    }

    // ---- chart of accounts ----------------------------------------------

    /// Create a child account under `parent`, allocating the next code in
    /// sequence. The category is inherited from the parent.
    pub fn create_account(
        &mut self,
        parent: &AccountCode,
        name: impl Into<String>,
        opening_balance: i64,
    ) -> DomainResult<AccountCode> {
        let code = self.chart.next_child_code(parent)?;
        let parent_account = self.chart.get(parent).ok_or(DomainError::NotFound)?;
        let account = Account {
            code: code.clone(),
            name: name.into(),
            level: level_for_depth(code.depth())?,
            parent: Some(parent.clone()),
            category: parent_account.category,
            opening_balance,
        };
        self.chart.add(account)?;
        Ok(code)
    }

    // ---- posting --------------------------------------------------------

    /// Bill a fee across the filtered cohort. Each kept student gets one
    /// posted FeeDue voucher and a matching balance increment; voucher
    /// numbers are returned in cohort order.
    pub fn post_fee_batch(
        &mut self,
        filter: &CohortFilter,
        spec: &FeeBatchSpec,
    ) -> DomainResult<Vec<String>> {
        let mut seq = self.voucher_seq;
        let batch = {
            let cohort = self.students.cohort(filter);
            generate_fee_batch(&cohort, spec, &self.billing, || {
                seq += 1;
                format!("FV-{seq:04}")
            })?
        };
        self.voucher_seq = seq;

        let mut vouchers = Vec::with_capacity(batch.len());
        for tx in batch {
            self.apply_balance_effect(&tx);
            vouchers.push(tx.voucher_no.clone());
            self.transactions.push(tx);
        }
        Ok(vouchers)
    }

    /// Record a fee payment from a student: cash in, receivable down.
    pub fn receive_fee(
        &mut self,
        admission_no: &AdmissionNo,
        amount: i64,
        date: NaiveDate,
    ) -> DomainResult<String> {
        if self.students.get(admission_no).is_none() {
            return Err(DomainError::NotFound);
        }
        let voucher_no = self.next_voucher("RV");
        let tx = Transaction::new(
            voucher_no.clone(),
            date,
            TransactionKind::FeeReceived,
            self.cash.clone(),
            self.billing.receivable.clone(),
            amount,
            Some(admission_no.clone()),
            "Fee received",
        )?;
        tracing::info!(voucher = %voucher_no, student = %admission_no, amount, "fee received");
        self.apply_balance_effect(&tx);
        self.transactions.push(tx);
        Ok(voucher_no)
    }

    /// Post a journal voucher between two existing accounts. A pending
    /// voucher sits outside statements and balances until approved.
    pub fn post_journal(
        &mut self,
        debit: AccountCode,
        credit: AccountCode,
        amount: i64,
        date: NaiveDate,
        details: impl Into<String>,
        pending: bool,
    ) -> DomainResult<String> {
        for code in [&debit, &credit] {
            if !self.chart.contains(code) {
                return Err(DomainError::validation(format!("unknown account '{code}'")));
            }
        }
        let voucher_no = self.next_voucher("JV");
        let tx = if pending {
            Transaction::new_pending(
                voucher_no.clone(),
                date,
                TransactionKind::Journal,
                debit,
                credit,
                amount,
                None,
                details,
            )?
        } else {
            Transaction::new(
                voucher_no.clone(),
                date,
                TransactionKind::Journal,
                debit,
                credit,
                amount,
                None,
                details,
            )?
        };
        self.transactions.push(tx);
        Ok(voucher_no)
    }

    // ---- lifecycle ------------------------------------------------------

    /// Approve a pending voucher, posting it and applying its balance effect.
    pub fn approve(&mut self, voucher_no: &str, user: &str) -> DomainResult<()> {
        let idx = self.position(voucher_no)?;
        self.transactions[idx].approve()?;
        let tx = self.transactions[idx].clone();
        self.apply_balance_effect(&tx);
        self.audit.record(
            tx.id,
            AuditAction::Approved,
            user,
            format!("voucher {} approved", tx.voucher_no),
        );
        Ok(())
    }

    /// Flag a posted voucher for deletion. Its balance effect stays applied
    /// until the delete is confirmed.
    pub fn request_delete(&mut self, voucher_no: &str, user: &str) -> DomainResult<()> {
        let idx = self.position(voucher_no)?;
        self.transactions[idx].request_delete()?;
        let tx = &self.transactions[idx];
        self.audit.record(
            tx.id,
            AuditAction::DeleteRequested,
            user,
            format!("voucher {} flagged for deletion", tx.voucher_no),
        );
        Ok(())
    }

    /// Take a delete-pending voucher back to posted. Nothing to audit; the
    /// books end up exactly as before the request.
    pub fn cancel_delete(&mut self, voucher_no: &str) -> DomainResult<()> {
        let idx = self.position(voucher_no)?;
        self.transactions[idx].cancel_delete()
    }

    /// Remove a delete-pending voucher for good, reversing its balance
    /// effect and recording the deletion.
    pub fn confirm_delete(&mut self, voucher_no: &str, user: &str) -> DomainResult<()> {
        let idx = self.position(voucher_no)?;
        if self.transactions[idx].status != TransactionStatus::DeletePending {
            return Err(DomainError::invariant(format!(
                "voucher {voucher_no} has no delete pending"
            )));
        }
        let tx = self.transactions.remove(idx);
        self.reverse_balance_effect(&tx);
        tracing::info!(voucher = %tx.voucher_no, "voucher deleted");
        self.audit.record(
            tx.id,
            AuditAction::Deleted,
            user,
            format!("voucher {} deleted: {}", tx.voucher_no, tx.details),
        );
        Ok(())
    }

    /// Change a voucher's amount, re-applying the balance delta and
    /// recording the old and new values.
    pub fn edit_amount(&mut self, voucher_no: &str, amount: i64, user: &str) -> DomainResult<()> {
        if amount < 0 {
            return Err(DomainError::validation("amount must be non-negative"));
        }
        let idx = self.position(voucher_no)?;
        let before = self.transactions[idx].clone();
        if before.affects_balance() {
            self.reverse_balance_effect(&before);
        }
        self.transactions[idx].amount = amount;
        let after = self.transactions[idx].clone();
        if after.affects_balance() {
            self.apply_balance_effect(&after);
        }
        self.audit.record(
            after.id,
            AuditAction::Edited,
            user,
            format!("amount changed from {} to {}", before.amount, amount),
        );
        Ok(())
    }

    // ---- queries --------------------------------------------------------

    /// The posted ledger statement for one student.
    pub fn student_statement(&self, admission_no: &AdmissionNo) -> DomainResult<StudentStatement> {
        if self.students.get(admission_no).is_none() {
            return Err(DomainError::NotFound);
        }
        Ok(project_statement(
            &self.transactions,
            admission_no,
            &self.billing.receivable,
        ))
    }

    // ---- auth -----------------------------------------------------------

    pub fn login(&self, username: &str, password: &str) -> DomainResult<Principal> {
        authenticate(&self.users, username, password)
    }

    pub fn visible_menu(&self, principal: &Principal) -> Vec<MenuItem> {
        self.menu.visible_for(principal)
    }

    // ---- import ---------------------------------------------------------

    /// Import a file by name and contents. Parsed rows are applied all or
    /// nothing: any bad row leaves the state untouched.
    pub fn apply_import(&mut self, file_name: &str, bytes: &[u8]) -> DomainResult<ImportOutcome> {
        let outcome =
            import_bytes(file_name, bytes).map_err(|e| DomainError::validation(e.to_string()))?;
        if let ImportOutcome::Rows(rows) = &outcome {
            match rows {
                ParsedRows::Students(rows) => self.import_students(rows)?,
                ParsedRows::Accounts(rows) => self.import_accounts(rows)?,
            }
        }
        Ok(outcome)
    }

    fn import_students(&mut self, rows: &[StudentRow]) -> DomainResult<()> {
        let mut staged = self.students.clone();
        for row in rows {
            let admission_no = AdmissionNo::new(&row.admission_no)?;
            let mut student = Student::new(admission_no, row.name.clone());
            student.father_name = row.father_name.clone().unwrap_or_default();
            student.program = row.program.clone().unwrap_or_default();
            student.semester = row.semester.clone().unwrap_or_default();
            student.campus = row.campus.clone().unwrap_or_default();
            student.board = row.board.clone().unwrap_or_default();
            student.rates = FeeRates {
                tuition_fee: row.tuition_fee,
                admission_fee: row.admission_fee,
                ..FeeRates::default()
            };
            staged.register(student)?;
        }
        tracing::info!(rows = rows.len(), "student import applied");
        self.students = staged;
        Ok(())
    }

    fn import_accounts(&mut self, rows: &[AccountRow]) -> DomainResult<()> {
        let mut staged = self.chart.clone();
        for row in rows {
            let code = AccountCode::parse(row.code.clone())?;
            let account = Account {
                name: row.name.clone(),
                level: level_for_depth(code.depth())?,
                parent: code.parent(),
                category: category_for_row(row, &code)?,
                opening_balance: row.opening_balance,
                code,
            };
            staged.add(account)?;
        }
        tracing::info!(rows = rows.len(), "account import applied");
        self.chart = staged;
        Ok(())
    }

    // ---- payroll --------------------------------------------------------

    /// Compute the monthly payroll and post its salary expense voucher
    /// (debit salaries expense, credit cash). A zero-total run posts nothing.
    pub fn run_payroll_month(&mut self, month: Month, date: NaiveDate) -> DomainResult<PayrollRun> {
        let run = run_payroll(&self.employees, month)?;
        if run.total > 0 {
            let voucher_no = self.next_voucher("PV");
            let tx = Transaction::new(
                voucher_no,
                date,
                TransactionKind::Journal,
                self.salaries_expense.clone(),
                self.cash.clone(),
                run.total,
                None,
                format!("Salaries for {}", month.name()),
            )?;
            self.transactions.push(tx);
        }
        Ok(run)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campuserp_fees::{FeeHead, MonthRange};
    use campuserp_students::Selector;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn admission(no: &str) -> AdmissionNo {
        AdmissionNo::new(no).unwrap()
    }

    fn seeded() -> AppState {
        let mut state = AppState::new();
        for (no, tuition) in [("S-001", 60_000), ("S-002", 30_000)] {
            let mut student = Student::new(admission(no), format!("Student {no}"));
            student.campus = "Main".to_string();
            student.rates = FeeRates {
                tuition_fee: tuition,
                admission_fee: 5_000,
                ..FeeRates::default()
            };
            state.register_student(student).unwrap();
        }
        state
    }

    fn tuition_spec() -> FeeBatchSpec {
        FeeBatchSpec {
            head: FeeHead::Tuition,
            override_amount: None,
            range: MonthRange::new(Month::January, Month::June),
            date: date("2024-01-05"),
        }
    }

    #[test]
    fn fee_batch_raises_student_balances() {
        let mut state = seeded();
        let vouchers = state
            .post_fee_batch(&CohortFilter::default(), &tuition_spec())
            .unwrap();

        assert_eq!(vouchers, vec!["FV-0001", "FV-0002"]);
        assert_eq!(state.students.get(&admission("S-001")).unwrap().balance, 60_000);
        assert_eq!(state.students.get(&admission("S-002")).unwrap().balance, 30_000);
        assert_eq!(state.transactions().len(), 2);
    }

    #[test]
    fn cohort_filter_narrows_the_batch() {
        let mut state = seeded();
        let mut other = Student::new(admission("S-003"), "Student S-003");
        other.campus = "North".to_string();
        other.rates.tuition_fee = 12_000;
        state.register_student(other).unwrap();

        let filter = CohortFilter {
            campus: Selector::only("North"),
            ..CohortFilter::default()
        };
        let vouchers = state.post_fee_batch(&filter, &tuition_spec()).unwrap();

        assert_eq!(vouchers.len(), 1);
        assert_eq!(state.students.get(&admission("S-001")).unwrap().balance, 0);
        assert_eq!(state.students.get(&admission("S-003")).unwrap().balance, 12_000);
    }

    #[test]
    fn receiving_a_fee_lowers_the_balance() {
        let mut state = seeded();
        state
            .post_fee_batch(&CohortFilter::default(), &tuition_spec())
            .unwrap();
        state
            .receive_fee(&admission("S-001"), 25_000, date("2024-01-10"))
            .unwrap();

        assert_eq!(state.students.get(&admission("S-001")).unwrap().balance, 35_000);

        let statement = state.student_statement(&admission("S-001")).unwrap();
        assert_eq!(statement.total_billed, 60_000);
        assert_eq!(statement.total_paid, 25_000);
        assert_eq!(statement.current_balance, 35_000);
    }

    #[test]
    fn pending_journal_counts_only_after_approval() {
        let mut state = seeded();
        let cash = AccountCode::parse(CASH_IN_HAND_CODE).unwrap();
        let receivable = AccountCode::parse(ACCOUNTS_RECEIVABLE_CODE).unwrap();

        let voucher = state
            .post_journal(cash, receivable, 1_000, date("2024-02-01"), "Adjustment", true)
            .unwrap();
        assert!(!state.transactions()[0].is_posted());

        state.approve(&voucher, "admin").unwrap();
        assert!(state.transactions()[0].is_posted());
        assert_eq!(state.audit().len(), 1);
        assert_eq!(state.audit().entries()[0].action, AuditAction::Approved);
    }

    #[test]
    fn delete_flow_reverses_the_balance_on_confirm_only() {
        let mut state = seeded();
        let vouchers = state
            .post_fee_batch(&CohortFilter::default(), &tuition_spec())
            .unwrap();
        let target = &vouchers[0];

        state.request_delete(target, "admin").unwrap();
        // Flagged but still applied.
        assert_eq!(state.students.get(&admission("S-001")).unwrap().balance, 60_000);

        state.confirm_delete(target, "admin").unwrap();
        assert_eq!(state.students.get(&admission("S-001")).unwrap().balance, 0);
        assert_eq!(state.transactions().len(), 1);

        let actions: Vec<AuditAction> =
            state.audit().entries().iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![AuditAction::DeleteRequested, AuditAction::Deleted]);
    }

    #[test]
    fn cancel_delete_restores_posted_without_touching_balances() {
        let mut state = seeded();
        let vouchers = state
            .post_fee_batch(&CohortFilter::default(), &tuition_spec())
            .unwrap();

        state.request_delete(&vouchers[0], "admin").unwrap();
        state.cancel_delete(&vouchers[0]).unwrap();

        assert!(state.transactions()[0].is_posted());
        assert_eq!(state.students.get(&admission("S-001")).unwrap().balance, 60_000);
        // Only the request is on the trail.
        assert_eq!(state.audit().len(), 1);
    }

    #[test]
    fn editing_an_amount_moves_the_balance_by_the_delta() {
        let mut state = seeded();
        let vouchers = state
            .post_fee_batch(&CohortFilter::default(), &tuition_spec())
            .unwrap();

        state.edit_amount(&vouchers[0], 45_000, "admin").unwrap();

        assert_eq!(state.students.get(&admission("S-001")).unwrap().balance, 45_000);
        assert_eq!(state.audit().entries()[0].action, AuditAction::Edited);
        assert!(state.audit().entries()[0]
            .extra_info
            .contains("from 60000 to 45000"));
    }

    #[test]
    fn account_allocation_inherits_the_parent_category() {
        let mut state = AppState::new();
        let parent = AccountCode::parse("1-01").unwrap();

        let code = state.create_account(&parent, "Bank Account", 0).unwrap();
        assert_eq!(code.as_str(), "1-01-002");
        assert_eq!(
            state.chart.get(&code).unwrap().category,
            AccountCategory::Asset
        );
    }

    #[test]
    fn student_import_is_all_or_nothing() {
        let mut state = seeded();
        // Second row collides with an existing admission no.
        let csv = "admissionNo,name,tuitionFee\nS-100,New One,9000\nS-001,Dup,1000\n";

        let err = state.apply_import("students.csv", csv.as_bytes());
        assert!(err.is_err());
        assert!(state.students.get(&admission("S-100")).is_none());
        assert_eq!(state.students.len(), 2);
    }

    #[test]
    fn account_import_builds_the_hierarchy() {
        let mut state = AppState::new();
        let csv = "code,name,openingBalance\n2,Liabilities,0\n2-01,Payables,0\n2-01-000,Vendor Payable,1500\n";

        state.apply_import("accounts.csv", csv.as_bytes()).unwrap();

        let code = AccountCode::parse("2-01-000").unwrap();
        let account = state.chart.get(&code).unwrap();
        assert_eq!(account.category, AccountCategory::Liability);
        assert_eq!(account.opening_balance, 1500);
    }

    #[test]
    fn bak_restore_is_simulated_and_changes_nothing() {
        let mut state = seeded();
        let before = state.clone();

        let outcome = state.apply_import("backup.bak", b"ignored").unwrap();
        assert!(matches!(outcome, ImportOutcome::SimulatedRestore { .. }));
        assert_eq!(state.students.len(), before.students.len());
        assert_eq!(state.chart.len(), before.chart.len());
    }

    #[test]
    fn payroll_run_posts_a_salary_voucher() {
        let mut state = AppState::new();
        state.employees.push(Employee::new("T. Ahmed", "Lecturer", 80_000));
        state.employees.push(Employee::new("R. Khan", "Clerk", 35_000));

        let run = state
            .run_payroll_month(Month::March, date("2024-03-31"))
            .unwrap();

        assert_eq!(run.total, 115_000);
        let tx = &state.transactions()[0];
        assert_eq!(tx.voucher_no, "PV-0001");
        assert_eq!(tx.amount, 115_000);
        assert_eq!(tx.debit_account.as_str(), SALARIES_EXPENSE_CODE);
        assert_eq!(tx.credit_account.as_str(), CASH_IN_HAND_CODE);
    }
}
