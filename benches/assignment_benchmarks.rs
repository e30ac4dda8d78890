use bounded_thompson::{
    ArmCounts, Campaign, EpsilonThompson, ParetoBetaPrior, RandomStream, StreamSource, tally,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use std::hint::black_box;

fn history(num_treatments: usize, n: usize) -> (Vec<usize>, Vec<u8>) {
    let assignments: Vec<usize> = (0..n).map(|i| i % num_treatments).collect();
    let outcomes: Vec<u8> = (0..n).map(|i| u8::from(i % 3 == 0)).collect();
    (assignments, outcomes)
}

fn bench_posterior(c: &mut Criterion) {
    let mut group = c.benchmark_group("posterior");
    let prior = ParetoBetaPrior::default();

    for num_draws in [10, 1_000, 100_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("sample", num_draws),
            num_draws,
            |b, &n| {
                let counts = ArmCounts::new(30, 70);
                let mut rng = RandomStream::seed_from_u64(42);
                b.iter(|| black_box(prior.sample(counts, n, &mut rng).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");

    for n_samples in [100, 10_000, 1_000_000].iter() {
        group.bench_with_input(BenchmarkId::new("tally", n_samples), n_samples, |b, &n| {
            let (assignments, outcomes) = history(5, n);
            b.iter(|| black_box(tally(5, &assignments, &outcomes).unwrap()));
        });
    }

    group.finish();
}

fn bench_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("assignment");
    let (num_draws, n_samples) = (1_000, 10_000);

    for n_arms in [2, 10, 100].iter() {
        group.bench_with_input(
            BenchmarkId::new("build_theta_matrix", n_arms),
            n_arms,
            |b, &k| {
                let policy = EpsilonThompson::with_epsilon(0.1, num_draws).unwrap();
                let (assignments, outcomes) = history(k, n_samples);
                let mut rng = RandomStream::seed_from_u64(42);

                b.iter(|| {
                    black_box(
                        policy
                            .build_theta_matrix(k, &assignments, &outcomes, &mut rng)
                            .unwrap(),
                    )
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("assign", n_arms), n_arms, |b, &k| {
            let policy = EpsilonThompson::with_epsilon(0.1, num_draws).unwrap();
            let (assignments, outcomes) = history(k, n_samples);
            let mut rng = RandomStream::seed_from_u64(42);

            b.iter(|| {
                black_box(
                    policy
                        .assign(k, &assignments, &outcomes, &mut rng)
                        .unwrap(),
                )
            });
        });

        // Theta already drawn; measures the argmax and the ε gate alone
        group.bench_with_input(
            BenchmarkId::new("assign_from_theta", n_arms),
            n_arms,
            |b, &k| {
                let policy = EpsilonThompson::with_epsilon(0.1, num_draws).unwrap();
                let (assignments, outcomes) = history(k, n_samples);
                let mut rng = RandomStream::seed_from_u64(42);
                let theta = policy
                    .build_theta_matrix(k, &assignments, &outcomes, &mut rng)
                    .unwrap();

                b.iter(|| black_box(policy.assign_from_theta(&theta, &mut rng)));
            },
        );
    }

    group.finish();
}

fn bench_campaign(c: &mut Criterion) {
    let treatments: Vec<String> = (0..10).map(|i| format!("treatment_{i}")).collect();
    let decisions: Vec<String> = (0..1_000).map(|i| treatments[i % 10].clone()).collect();
    let outcomes: Vec<u8> = (0..1_000).map(|i| u8::from(i % 4 == 0)).collect();

    c.bench_function("campaign_builder", |b| {
        b.iter(|| {
            black_box(
                Campaign::builder()
                    .treatments(treatments.clone())
                    .epsilon(0.1)
                    .num_draws(500)
                    .build()
                    .unwrap(),
            )
        });
    });

    c.bench_function("campaign_assign", |b| {
        let campaign = Campaign::builder()
            .treatments(treatments.clone())
            .num_draws(500)
            .build()
            .unwrap();
        b.iter(|| {
            black_box(
                campaign
                    .assign(&decisions, &outcomes, StreamSource::FromSeed(42))
                    .unwrap(),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_posterior,
    bench_history,
    bench_assignment,
    bench_campaign
);
criterion_main!(benches);
