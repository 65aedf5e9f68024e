use core::hint::black_box;

use chain_table::ChainTable;
use chain_table::strategy::Modular;
use criterion::AxisScale;
use criterion::BatchSize;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

const SIZES: &[usize] = &[64, 256, 1024, 4096];

// A prime close to the largest size, so chains stay short at every measured
// load. The stock 53-bucket table is measured alongside it to show what
// overload costs.
const WIDE_BUCKETS: usize = 4099;

fn shuffled_keys(n: usize) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..n as u64).collect();
    let mut rng = SmallRng::seed_from_u64(0x00C0_FFEE);
    keys.shuffle(&mut rng);
    keys
}

fn wide_table() -> ChainTable<u64, u64, Modular> {
    ChainTable::with_buckets(WIDE_BUCKETS, Modular::new(WIDE_BUCKETS))
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let keys = shuffled_keys(size);

        group.bench_with_input(BenchmarkId::new("chain_table_wide", size), &keys, |b, keys| {
            b.iter_batched(
                wide_table,
                |mut table| {
                    for &k in keys {
                        black_box(table.insert(k, k));
                    }
                    table
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("chain_table_53", size), &keys, |b, keys| {
            b.iter_batched(
                || ChainTable::new(Modular::default()),
                |mut table| {
                    for &k in keys {
                        black_box(table.insert(k, k));
                    }
                    table
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("hashbrown", size), &keys, |b, keys| {
            b.iter_batched(
                HashMap::new,
                |mut map| {
                    for &k in keys {
                        black_box(map.insert(k, k));
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let keys = shuffled_keys(size);

        let mut wide = wide_table();
        let mut narrow = ChainTable::new(Modular::default());
        let mut map = HashMap::new();
        for &k in &keys {
            wide.insert(k, k);
            narrow.insert(k, k);
            map.insert(k, k);
        }

        group.bench_with_input(BenchmarkId::new("chain_table_wide", size), &keys, |b, keys| {
            b.iter(|| {
                for k in keys {
                    black_box(wide.get(black_box(k)));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("chain_table_53", size), &keys, |b, keys| {
            b.iter(|| {
                for k in keys {
                    black_box(narrow.get(black_box(k)));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("hashbrown", size), &keys, |b, keys| {
            b.iter(|| {
                for k in keys {
                    black_box(map.get(black_box(k)));
                }
            });
        });
    }

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let keys = shuffled_keys(size);

        let mut wide = wide_table();
        let mut map = HashMap::new();
        for &k in &keys {
            wide.insert(k, k);
            map.insert(k, k);
        }

        group.bench_with_input(BenchmarkId::new("chain_table_wide", size), &keys, |b, keys| {
            b.iter_batched(
                || wide.clone(),
                |mut table| {
                    for k in keys {
                        black_box(table.remove(k));
                    }
                    table
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("hashbrown", size), &keys, |b, keys| {
            b.iter_batched(
                || map.clone(),
                |mut map| {
                    for k in keys {
                        black_box(map.remove(k));
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup, bench_remove);
criterion_main!(benches);
