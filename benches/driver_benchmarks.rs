//! Criterion benchmarks for xe_db_driver

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use xe_db_driver::backends::RecordingClient;
use xe_db_driver::core::dialect::ORACLE;
use xe_db_driver::core::quote::quote;
use xe_db_driver::prelude::*;

// ============================================================================
// Static Lookups
// ============================================================================

fn bench_type_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("type_mapping");
    group.throughput(Throughput::Elements(1));

    group.bench_function("first_entry", |b| {
        b.iter(|| black_box(ORACLE.column_types.map_type(black_box("bignumber"))));
    });

    group.bench_function("last_entry", |b| {
        b.iter(|| black_box(ORACLE.column_types.map_type(black_box("float"))));
    });

    group.bench_function("unmapped", |b| {
        b.iter(|| black_box(ORACLE.column_types.map_type(black_box("geometry"))));
    });

    group.finish();
}

fn bench_quote(c: &mut Criterion) {
    let mut group = c.benchmark_group("quote");
    let input = r#"O\'Reilly said \"hi\" at C:\\temp"#;

    group.bench_function("modern", |b| {
        b.iter(|| black_box(quote(black_box(input), false)));
    });

    group.bench_function("legacy", |b| {
        b.iter(|| black_box(quote(black_box(input), true)));
    });

    group.finish();
}

// ============================================================================
// Transaction Control
// ============================================================================

fn bench_nested_transactions(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_transactions");
    let client = RecordingClient::new();
    let config = DriverConfig::new(
        DatabaseType::Oracle,
        ConnectionBuilder::new().host("db.local").port(1521).build(),
    );
    let mut db = Driver::open_with(config, Box::new(client.clone())).expect("Failed to open");

    group.bench_function("begin_savepoint_rollback_commit", |b| {
        b.iter(|| {
            db.begin_transaction();
            db.begin_transaction();
            let _ = db.rollback_transaction();
            let _ = db.commit_transaction();
            client.clear();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_type_mapping,
    bench_quote,
    bench_nested_transactions
);
criterion_main!(benches);
