use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use window_features::{TimeSeriesTable, WindowedFeatureBuilder};

fn create_series(n_rows: usize, n_features: usize) -> TimeSeriesTable {
    let mut rng = rand::thread_rng();

    let columns: Vec<(String, Vec<f64>)> = (0..n_features)
        .map(|i| {
            let values: Vec<f64> = (0..n_rows).map(|_| rng.gen::<f64>() * 10.0).collect();
            (format!("feature_{}", i), values)
        })
        .collect();

    TimeSeriesTable::from_columns(columns).unwrap()
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");

    for n_rows in [1000, 10000, 100000].iter() {
        let table = create_series(*n_rows, 8);
        let names = table.column_names().to_vec();

        group.bench_with_input(BenchmarkId::new("lag_10", n_rows), &table, |b, table| {
            let mut builder = WindowedFeatureBuilder::new();
            b.iter(|| builder.flatten(black_box(table), &names, 10, true).unwrap())
        });
    }

    group.finish();
}

fn bench_reshape(c: &mut Criterion) {
    let mut group = c.benchmark_group("reshape");

    for lag in [1, 10, 50].iter() {
        let table = create_series(10000, 8);
        let mut builder = WindowedFeatureBuilder::new();
        let flat = builder
            .flatten(&table, table.column_names(), *lag, true)
            .unwrap();

        group.bench_with_input(BenchmarkId::new("tensor", lag), &flat, |b, flat| {
            b.iter(|| builder.reshape_to_tensor(black_box(flat)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_flatten, bench_reshape);
criterion_main!(benches);
