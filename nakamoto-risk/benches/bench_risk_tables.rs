use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nakamoto_risk::math::*;

fn bench_binomial_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_binomial_table");

    for trials in [64, 512, 2048].iter() {
        group.bench_with_input(format!("trials={}", trials), trials, |b, &trials| {
            b.iter(|| Binomial::new(black_box(0.7), black_box(trials)));
        });
    }

    group.finish();
}

fn bench_double_spend(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_double_spend");

    for prob in [0.1, 0.3, 0.45].iter() {
        let model = DoubleSpend::new(1000, *prob).unwrap();
        for depth in [10, 100, 1000].iter() {
            group.bench_with_input(format!("depth={}, q={}", depth, prob), depth, |b, &depth| {
                b.iter(|| model.probability(black_box(depth)));
            });
        }
    }

    group.finish();
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_window_deficit");

    for prob in [0.1, 0.3, 0.4].iter() {
        let probabilistic = ProbabilisticWindow::from_log4(4, *prob).unwrap();
        let exact = ExactWindow::from_log4(4, *prob).unwrap();
        group.bench_function(format!("binomial, q={}", prob), |b| {
            b.iter(|| probabilistic.few_honest_prob_log4(black_box(2)));
        });
        group.bench_function(format!("exact, q={}", prob), |b| {
            b.iter(|| exact.few_honest_prob_log4(black_box(2)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_binomial_table, bench_double_spend, bench_window);
criterion_main!(benches);
