use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use msdsort::prelude::*;
use rand::Rng;
use std::hint::black_box;
use std::time::Duration;

fn bench_1m_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("1M Strings");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(90));

    let mut rng = rand::rng();
    let count = 1_000_000;

    let random_strings: Vec<String> = (0..count)
        .map(|_| {
            let len = rng.random_range(8..24);
            (0..len).map(|_| rng.random::<char>()).collect()
        })
        .collect();

    let total_bytes: usize = random_strings.iter().map(|s| s.len()).sum();
    group.throughput(Throughput::Bytes(total_bytes as u64));

    group.bench_function("msdsort", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| msdsort(black_box(&mut data)),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("msdsort (utf-16 keys)", |b| {
        let utf16: Vec<Vec<u16>> = random_strings
            .iter()
            .map(|s| s.encode_utf16().collect())
            .collect();
        b.iter_batched(
            || utf16.clone(),
            |mut data| msdsort(black_box(&mut data)),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("slice::sort (stable)", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| data.sort(),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("slice::sort_unstable", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| data.sort_unstable(),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_1m_strings);
criterion_main!(benches);
