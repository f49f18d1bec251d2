//! Micro-benchmarks for the hot read paths: wallet balance folds over
//! ledgers of varying depth and the commission split.

use rust_decimal::Decimal;
use trainer_earnings_engine::core::{CommissionCalculator, LedgerStore};
use trainer_earnings_engine::types::{EntryStatus, EntryType};

fn main() {
    divan::main();
}

fn seeded_ledger(entries: usize) -> LedgerStore {
    let ledger = LedgerStore::new();
    for i in 0..entries {
        let entry_type = if i % 5 == 4 {
            EntryType::Debit
        } else {
            EntryType::Credit
        };
        ledger
            .append(
                1,
                entry_type,
                Decimal::new(100, 0),
                EntryStatus::Successful,
                "Bench entry".to_string(),
                None,
            )
            .unwrap();
    }
    ledger
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn wallet_fold(bencher: divan::Bencher, entries: usize) {
    let ledger = seeded_ledger(entries);
    bencher.bench(|| ledger.wallet(divan::black_box(1)).unwrap());
}

#[divan::bench]
fn commission_split(bencher: divan::Bencher) {
    let calculator = CommissionCalculator::default();
    bencher.bench(|| calculator.split(divan::black_box(Decimal::new(9999, 0))).unwrap());
}
