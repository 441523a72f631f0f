use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use campuserp_accounts::AccountCode;
use campuserp_core::AdmissionNo;
use campuserp_ledger::{project_statement, Transaction, TransactionKind};
use chrono::NaiveDate;

fn history(len: usize) -> (Vec<Transaction>, AdmissionNo, AccountCode) {
    let receivable = AccountCode::parse("1-01-001").unwrap();
    let income = AccountCode::parse("4-01-000").unwrap();
    let cash = AccountCode::parse("1-01-000").unwrap();
    let admission = AdmissionNo::new("A-1023").unwrap();

    let txs = (0..len)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(2024, (i % 12) as u32 + 1, (i % 28) as u32 + 1)
                .unwrap();
            if i % 3 == 0 {
                Transaction::new(
                    format!("RV-{i}"),
                    date,
                    TransactionKind::FeeReceived,
                    cash.clone(),
                    receivable.clone(),
                    500,
                    Some(admission.clone()),
                    "Fee received",
                )
                .unwrap()
            } else {
                Transaction::new(
                    format!("FV-{i}"),
                    date,
                    TransactionKind::FeeDue,
                    receivable.clone(),
                    income.clone(),
                    1_000,
                    Some(admission.clone()),
                    "Tuition Fee",
                )
                .unwrap()
            }
        })
        .collect();

    (txs, admission, receivable)
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_projection");

    for len in [100usize, 1_000, 10_000] {
        let (txs, admission, receivable) = history(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| {
                let statement =
                    project_statement(black_box(&txs), black_box(&admission), &receivable);
                black_box(statement.current_balance)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_projection);
criterion_main!(benches);
