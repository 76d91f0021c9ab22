//! Benchmarks for range table construction and lookup.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ipfilter::{FilterMode, IpFilter, Range, RangeTable};

/// Generate `count` scattered IPv4 subnets of mixed prefix lengths.
fn generate_v4_ranges(count: usize) -> Vec<Range<u32>> {
    let mut seed = 0x2545_F491_4F6C_DD1Du64;
    (0..count)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let prefix_len = 16 + (seed % 17) as u8;
            Range::subnet(seed as u32, prefix_len).unwrap()
        })
        .collect()
}

/// Generate `count` IPv6 /48 subnets under 2001:db8::/32.
fn generate_v6_ranges(count: usize) -> Vec<Range<u128>> {
    let base: u128 = 0x2001_0db8 << 96;
    (0..count as u128)
        .map(|i| Range::subnet(base | (i.wrapping_mul(7919) & 0xFFFF) << 80, 48).unwrap())
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_build");

    for size in [1_000, 10_000, 100_000] {
        let ranges = generate_v4_ranges(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("v4", size), &ranges, |b, ranges| {
            b.iter(|| RangeTable::from_ranges(black_box(ranges.clone())))
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let queries: Vec<u32> = (0..10_000u32).map(|i| i.wrapping_mul(2_654_435_761)).collect();

    for size in [1_000, 100_000] {
        let table = RangeTable::from_ranges(generate_v4_ranges(size));
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_with_input(BenchmarkId::new("v4", size), &table, |b, table| {
            b.iter(|| queries.iter().filter(|q| table.contains(black_box(**q))).count())
        });
    }

    let table = RangeTable::from_ranges(generate_v6_ranges(10_000));
    let filter = IpFilter::new(table, FilterMode::Exclude);
    let v6_queries: Vec<u128> = queries.iter().map(|q| (0x2001_0db8u128 << 96) | (*q as u128) << 64).collect();
    group.bench_function("v6_exclude", |b| {
        b.iter(|| v6_queries.iter().filter(|q| filter.check(black_box(**q))).count())
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_lookup);
criterion_main!(benches);
