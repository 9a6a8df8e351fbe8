//! Criterion benchmarks for the closed-form Black-Scholes engine.
//!
//! Measures engine construction, full valuation, and sensitivity sweeps
//! to characterise the per-quote cost of the analytical model.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::analytical::{BlackScholes, OptionParameters, Parameter, SensitivityCurve};

fn at_the_money() -> OptionParameters {
    OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
}

/// Benchmark engine construction and individual outputs.
fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("black_scholes");
    let params = at_the_money();

    group.bench_function("construction", |b| {
        b.iter(|| BlackScholes::new(black_box(params)));
    });

    let engine = BlackScholes::new(params);
    group.bench_function("call_price", |b| {
        b.iter(|| black_box(&engine).call_price());
    });
    group.bench_function("valuation", |b| {
        b.iter(|| black_box(&engine).valuation());
    });

    // Construction plus all outputs, as done per dataset row
    group.bench_function("price_from_inputs", |b| {
        b.iter(|| {
            BlackScholes::from_inputs(
                black_box(105.0),
                black_box(100.0),
                black_box(0.75),
                black_box(0.03),
                black_box(0.25),
            )
            .unwrap()
            .valuation()
        });
    });

    group.finish();
}

/// Benchmark sensitivity sweeps across grid sizes.
fn bench_sensitivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("sensitivity_sweep");
    let params = at_the_money();

    for points in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("volatility", points), &points, |b, &n| {
            b.iter(|| {
                SensitivityCurve::over_range(&params, Parameter::Volatility, 0.1, 0.5, black_box(n))
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engine, bench_sensitivity);
criterion_main!(benches);
