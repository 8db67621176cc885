use benchmarks::{numeric_matrix, synthetic_students};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scoreprep::preprocessing::{
    FittedTransformer, ImputeStrategy, SimpleImputer, StandardScaler, Transformer,
};
use scoreprep::transformation::build_preprocessor;

fn bench_fit(c: &mut Criterion) {
    for size in [100, 1000, 10000].iter() {
        c.bench_with_input(BenchmarkId::new("fit_preprocessor", size), size, |b, &n| {
            let table = synthetic_students(n);
            let preprocessor = build_preprocessor().unwrap();

            b.iter(|| {
                let fitted = preprocessor.fit(black_box(&table)).unwrap();
                black_box(fitted);
            });
        });
    }
}

fn bench_transform(c: &mut Criterion) {
    for size in [100, 1000, 10000].iter() {
        c.bench_with_input(
            BenchmarkId::new("transform_preprocessor", size),
            size,
            |b, &n| {
                let table = synthetic_students(n);
                let fitted = build_preprocessor().unwrap().fit(&table).unwrap();

                b.iter(|| {
                    let out = fitted.transform(black_box(&table)).unwrap();
                    black_box(out);
                });
            },
        );
    }
}

fn bench_median_imputer(c: &mut Criterion) {
    for size in [1000, 100000].iter() {
        c.bench_with_input(BenchmarkId::new("median_imputer_fit", size), size, |b, &n| {
            let data = numeric_matrix(n, 2);
            let imputer = SimpleImputer::new(ImputeStrategy::Median);

            b.iter(|| {
                let fitted = imputer.fit(black_box(&data)).unwrap();
                black_box(fitted);
            });
        });
    }
}

fn bench_standard_scaler(c: &mut Criterion) {
    for size in [1000, 100000].iter() {
        c.bench_with_input(
            BenchmarkId::new("standard_scaler_fit_transform", size),
            size,
            |b, &n| {
                let data = numeric_matrix(n, 17);
                let scaler = StandardScaler::new();

                b.iter(|| {
                    let out = scaler.fit_transform(black_box(&data)).unwrap();
                    black_box(out);
                });
            },
        );
    }
}

criterion_group!(
    benches,
    bench_fit,
    bench_transform,
    bench_median_imputer,
    bench_standard_scaler
);
criterion_main!(benches);
