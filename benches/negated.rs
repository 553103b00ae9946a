use criterion::black_box;
use criterion::Criterion;
use criterion::{criterion_group, criterion_main};
use negated_rv::prelude::*;

const SEED: u64 = 0x1234;

fn bench_typed_vs_named(c: &mut Criterion) {
    let mut group = c.benchmark_group("Negated typed vs named");
    let neg = Frozen::with_seed(Gaussian::new(1.0, 2.0).unwrap(), SEED).negated();

    for (name, x) in [("pdf", 0.3), ("cdf", 0.3), ("ppf", 0.7)] {
        group.bench_function(format!("{name} typed"), |b| {
            b.iter(|| match name {
                "pdf" => neg.pdf(black_box(x)).map(Value::Scalar),
                "cdf" => Ok(Value::Scalar(neg.cdf(black_box(x)))),
                _ => Ok(Value::Scalar(neg.ppf(black_box(x)))),
            })
        });
        group.bench_function(format!("{name} named"), |b| {
            let mut neg = neg.clone();
            b.iter(|| neg.query(black_box(name), &[black_box(x)]))
        });
    }
}

fn bench_negated_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("Negated draw");
    for n in [1, 10, 100] {
        let mut source =
            Frozen::with_seed(Binomial::new(20, 0.3).unwrap(), SEED);
        let mut neg = source.clone().negated();
        group.bench_function(format!("source rvs, n = {n}"), |b| {
            b.iter(|| source.rvs(black_box(n)))
        });
        group.bench_function(format!("negated rvs, n = {n}"), |b| {
            b.iter(|| neg.rvs(black_box(n)))
        });
    }
}

fn bench_negated_expect(c: &mut Criterion) {
    let neg = Frozen::with_seed(Exponential::new(1.5).unwrap(), SEED).negated();
    c.bench_function("Negated expect_with", |b| {
        b.iter(|| neg.expect_with(|x| black_box(x) * x))
    });
}

criterion_group!(
    negated_benches,
    bench_typed_vs_named,
    bench_negated_draw,
    bench_negated_expect,
);
criterion_main!(negated_benches);
