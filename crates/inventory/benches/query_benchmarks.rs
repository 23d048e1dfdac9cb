use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, NaiveDate};
use labstock_inventory::{
    BatchFilter, ExpiryStatus, InventoryStore, QuantityUnit, RecordIntake, RecordUsage,
};
use rust_decimal::Decimal;

const CHEMICALS: [(&str, &str); 4] = [
    ("Sodium Hydroxide", "Base"),
    ("Hydrochloric Acid", "Acid"),
    ("Acetone", "Solvent"),
    ("Potassium Nitrate", "Salt"),
];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Store with `size` batches spread over ~90 days of expiry and some usage.
fn seeded_store(size: usize) -> InventoryStore {
    let mut store = InventoryStore::new();
    for i in 0..size {
        let (name, category) = CHEMICALS[i % CHEMICALS.len()];
        let batch_id = store
            .record_intake(
                RecordIntake {
                    chemical_name: name.to_string(),
                    category: category.to_string(),
                    batch_number: format!("B-{i:05}"),
                    received_date: Some(today()),
                    expiry_date: today() + Duration::days((i % 90) as i64 - 10),
                    quantity_value: Decimal::from(100),
                    quantity_unit: QuantityUnit::ALL[i % QuantityUnit::ALL.len()],
                    remarks: String::new(),
                },
                today(),
            )
            .unwrap()
            .batch_id();

        if i % 3 == 0 {
            store
                .record_usage(
                    RecordUsage {
                        batch_id,
                        quantity_used: Decimal::from((i % 100) as i64 + 1),
                        usage_date: None,
                        purpose: None,
                        remarks: None,
                    },
                    today(),
                )
                .unwrap();
        }
    }
    store
}

fn bench_filter_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_batches");

    for size in [100usize, 1_000, 10_000].iter() {
        let store = seeded_store(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("search_only", size), size, |b, _| {
            let filter = BatchFilter::new().with_search("acid");
            b.iter(|| black_box(store.search(&filter, today())).len());
        });

        group.bench_with_input(BenchmarkId::new("combined", size), size, |b, _| {
            let filter = BatchFilter::new()
                .with_search("so")
                .with_status(ExpiryStatus::Yellow)
                .with_unit(QuantityUnit::Milliliter);
            b.iter(|| black_box(store.search(&filter, today())).len());
        });
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard");

    for size in [100usize, 1_000, 10_000].iter() {
        let store = seeded_store(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("aggregate", size), size, |b, _| {
            b.iter(|| black_box(store.dashboard(today())));
        });
        group.bench_with_input(BenchmarkId::new("available_batches", size), size, |b, _| {
            b.iter(|| black_box(store.available_batches()).len());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter_batches, bench_dashboard);
criterion_main!(benches);
