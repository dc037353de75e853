use criterion::{black_box, criterion_group, criterion_main, Criterion};

use methfinder::compare::{compare_samples, compare_sites};
use methfinder::datasets;
use methfinder::stats::{fligner_killeen, levene, mann_whitney_u, shapiro_wilk, Center};

fn group(len: usize, offset: f64) -> Vec<f64> {
    (0..len)
        .map(|i| offset + f64::from(u32::try_from(i * 7 % 13).unwrap()) * 2.5)
        .collect()
}

fn tests_benchmark(c: &mut Criterion) {
    let control = group(500, 0.0);
    let perturbation = group(400, 5.0);
    let groups: [&[f64]; 2] = [&control, &perturbation];

    c.bench_function("shapiro-wilk 500", |b| {
        b.iter(|| shapiro_wilk(black_box(&control)))
    });
    c.bench_function("mann-whitney 500x400", |b| {
        b.iter(|| mann_whitney_u(black_box(&control), black_box(&perturbation)))
    });
    c.bench_function("mann-whitney exact 8x8", |b| {
        let x = [1.0, 3.0, 5.0, 7.0, 9.0, 11.0, 13.0, 15.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0];
        b.iter(|| mann_whitney_u(black_box(&x), black_box(&y)))
    });
    c.bench_function("levene 500x400", |b| {
        b.iter(|| levene(black_box(&groups), Center::Median))
    });
    c.bench_function("fligner 500x400", |b| {
        b.iter(|| fligner_killeen(black_box(&groups)))
    });
}

fn datasets_benchmark(c: &mut Criterion) {
    let collagen = datasets::collagen();
    c.bench_function("compare collagen", |b| {
        b.iter(|| {
            (
                compare_samples(black_box(&collagen)),
                compare_sites(black_box(&collagen)),
            )
        })
    });
}

criterion_group!(stats, tests_benchmark, datasets_benchmark);
criterion_main!(stats);
