mod common;

use std::hint::black_box;

use common::workload::{Distribution, StreamConfig, top_k_recall};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use stream_summary::FrequencyTable;

const CAPACITY: usize = 1024;
const STREAM_LEN: usize = 64 * 1024;

fn stream(distribution: Distribution) -> Vec<u64> {
    StreamConfig {
        universe: 100_000,
        distribution,
        seed: 42,
    }
    .generate(STREAM_LEN)
}

fn bench_add_by_distribution(c: &mut Criterion) {
    let mut group = c.benchmark_group("frequency_table_add");
    group.throughput(Throughput::Elements(STREAM_LEN as u64));

    let cases = [
        ("uniform", Distribution::Uniform),
        (
            "hotset",
            Distribution::Hotset {
                hot_fraction: 0.01,
                hot_prob: 0.9,
            },
        ),
        ("zipf_0.99", Distribution::Zipfian { theta: 0.99 }),
    ];
    for (name, distribution) in cases {
        let items = stream(distribution);
        group.bench_function(name, |b| {
            b.iter_batched(
                || FrequencyTable::new(CAPACITY),
                |mut table| {
                    for &item in &items {
                        table.add(black_box(item));
                    }
                    table
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_promote_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("frequency_table_promote");
    group.throughput(Throughput::Elements(CAPACITY as u64));
    group.bench_function("tracked_items", |b| {
        b.iter_batched(
            || {
                let mut table = FrequencyTable::new(CAPACITY);
                for item in 0..CAPACITY as u64 {
                    table.add(item);
                }
                table
            },
            |mut table| {
                for item in 0..CAPACITY as u64 {
                    table.add(black_box(item));
                }
                table
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_reads(c: &mut Criterion) {
    let items = stream(Distribution::Zipfian { theta: 0.99 });
    let mut table = FrequencyTable::new(CAPACITY);
    for &item in &items {
        table.add(item);
    }
    eprintln!(
        "zipf top-100 recall at capacity {}: {:.3}",
        CAPACITY,
        top_k_recall(&table, &items, 100)
    );

    let mut group = c.benchmark_group("frequency_table_read");
    group.bench_function("exists", |b| {
        b.iter(|| {
            for item in 0..1024u64 {
                black_box(table.exists(&black_box(item)));
            }
        })
    });
    group.bench_function("top_k_100", |b| b.iter(|| black_box(table.top_k(100))));
    group.bench_function("tracked_items", |b| {
        b.iter(|| black_box(table.tracked_items()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_add_by_distribution,
    bench_promote_only,
    bench_reads
);
criterion_main!(benches);
