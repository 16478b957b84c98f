use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gemini_key_rotator::{mask_credential, CredentialRotator, RotationStrategy, RotatorOverrides};

fn key_list(count: usize) -> String {
    (0..count)
        .map(|i| format!("AIzaSyBenchmarkKey{i:06}"))
        .collect::<Vec<_>>()
        .join(";")
}

fn bench_rotation(c: &mut Criterion) {
    let raw = key_list(64);
    let mut group = c.benchmark_group("rotate");

    for strategy in [
        RotationStrategy::RoundRobin,
        RotationStrategy::LeastErrors,
        RotationStrategy::Random,
    ] {
        let rotator = CredentialRotator::new(
            &raw,
            RotatorOverrides::default()
                .with_strategy(strategy)
                .with_seed(7),
        )
        .unwrap();
        group.bench_function(strategy.as_str(), |b| {
            b.iter(|| black_box(rotator.rotate().unwrap()))
        });
    }

    group.finish();
}

fn bench_read_paths(c: &mut Criterion) {
    let rotator = CredentialRotator::new(&key_list(64), RotatorOverrides::default()).unwrap();

    c.bench_function("get_current", |b| {
        b.iter(|| black_box(rotator.get_current().unwrap()))
    });
    c.bench_function("get_all_status", |b| {
        b.iter(|| black_box(rotator.get_all_status()))
    });
    c.bench_function("mask_credential", |b| {
        b.iter(|| black_box(mask_credential(black_box("AIzaSyBenchmarkKey000042"))))
    });
}

criterion_group!(benches, bench_rotation, bench_read_paths);
criterion_main!(benches);
