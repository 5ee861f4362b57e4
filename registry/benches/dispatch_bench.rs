// Dispatch and normalization benchmarks for the transaction registry.
//
// Covers table construction, (kind, version) lookup, and normalization of a
// plain transfer and of mass transfers at various sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

use bancoin_tx_registry::{
    get_byte_encoder, normalize_json, AliasResolver, DispatchTable, NetworkContext,
    TimestampPolicy, TransactionKind,
};

fn bench_table_build(c: &mut Criterion) {
    c.bench_function("dispatch/table_build", |b| {
        b.iter(DispatchTable::standard);
    });
}

fn bench_lookup(c: &mut Criterion) {
    // Force the global table before measuring.
    DispatchTable::global();

    c.bench_function("dispatch/lookup_hit", |b| {
        b.iter(|| get_byte_encoder(TransactionKind::ScriptInvocation, 1).unwrap());
    });
    c.bench_function("dispatch/lookup_miss", |b| {
        b.iter(|| get_byte_encoder(TransactionKind::Transfer, 9).is_err());
    });
}

fn bench_normalize_transfer(c: &mut Criterion) {
    let ctx = NetworkContext::testnet().with_timestamp_policy(TimestampPolicy::Fixed(1));
    let data = json!({
        "recipient": "bob",
        "amount": {"coins": 100, "assetId": "A", "decimals": 2},
        "attachment": "invoice 42",
        "timestamp": "2020-09-13T12:26:40Z",
        "fee": 100000,
    });

    c.bench_function("normalize/transfer", |b| {
        b.iter(|| {
            normalize_json(TransactionKind::Transfer, data.clone(), &ctx, &AliasResolver).unwrap()
        });
    });
}

fn bench_normalize_mass_transfer(c: &mut Criterion) {
    let ctx = NetworkContext::mainnet().with_timestamp_policy(TimestampPolicy::Fixed(1));
    let mut group = c.benchmark_group("normalize/mass_transfer");

    for size in [10, 50, 100] {
        let transfers: Vec<_> = (0..size)
            .map(|i| json!({"name": format!("user{i:03}"), "amount": i}))
            .collect();
        let data = json!({"transfers": transfers, "attachment": [1, 2, 3]});

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                normalize_json(TransactionKind::MassTransfer, data.clone(), &ctx, &AliasResolver)
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_table_build,
    bench_lookup,
    bench_normalize_transfer,
    bench_normalize_mass_transfer,
);
criterion_main!(benches);
