use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use uqkit::copula::{Copula, MarshallOlkin};
use uqkit::distfunc::{pstudent, qstudent};
use uqkit::function::{Evaluation, InverseBoxCox};
use uqkit::{Point, Sample};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Deterministic sample with entries spread over [-0.9, 3.1).
fn spread_sample(size: usize, dimension: usize) -> Sample {
    let data = (0..size * dimension).map(|i| ((i * 7919) % 4000) as f64 * 1e-3 - 0.9).collect();
    Sample::from_rows(dimension, data).unwrap()
}

// ---------------------------------------------------------------------------
// Student regimes
// ---------------------------------------------------------------------------

fn student_cdf(c: &mut Criterion) {
    let mut g = c.benchmark_group("pstudent");
    // closed form, incomplete beta, Hill's transformation
    for &nu in &[3.0, 17.5, 2.0e5] {
        g.bench_with_input(BenchmarkId::from_parameter(nu), &nu, |b, &nu| {
            b.iter(|| pstudent(black_box(nu), black_box(1.7_f64), true))
        });
    }
    g.finish();
}

fn student_quantile(c: &mut Criterion) {
    let mut g = c.benchmark_group("qstudent");
    for &nu in &[2.0, 7.5, 60.0, 2.0e5] {
        g.bench_with_input(BenchmarkId::from_parameter(nu), &nu, |b, &nu| {
            b.iter(|| qstudent(black_box(nu), black_box(1e-6_f64), true))
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

fn inverse_box_cox_batch(c: &mut Criterion) {
    let mut g = c.benchmark_group("inverse_box_cox");
    let f = InverseBoxCox::new(Point::from([0.3, 1e-9, -0.2])).unwrap();
    for &size in &[1_000usize, 100_000] {
        let s = spread_sample(size, 3);
        g.bench_with_input(BenchmarkId::new("sample", size), &s, |b, s| {
            b.iter(|| f.evaluate_sample(black_box(s)))
        });
    }
    let x = Point::from([0.5, 1.0, 2.0]);
    g.bench_function("point", |b| b.iter(|| f.evaluate(black_box(&x))));
    g.finish();
}

fn marshall_olkin(c: &mut Criterion) {
    let mut g = c.benchmark_group("marshall_olkin");
    let copula = MarshallOlkin::new(0.4, 0.7).unwrap();
    g.bench_function("sample_100k", |b| b.iter(|| copula.sample(black_box(100_000), 42)));
    let u = copula.sample(100_000, 1);
    g.bench_function("cdf_sample_100k", |b| b.iter(|| copula.cdf_sample(black_box(&u))));
    g.finish();
}

criterion_group!(
    benches,
    student_cdf,
    student_quantile,
    inverse_box_cox_batch,
    marshall_olkin
);
criterion_main!(benches);
