use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use msdsort::prelude::*;
use rand::Rng;
use std::hint::black_box;

// Characters past this index are left to the finishing comparison sort.
const PARTIAL_CHARS: usize = 21;

fn bench_group(c: &mut Criterion, name: &str, input: &[String]) {
    let mut group = c.benchmark_group(name);
    group.sample_size(10);

    group.bench_function("msdsort", |b| {
        b.iter_batched(
            || input.to_vec(),
            |mut data| msdsort(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("msdsort_partial + slice::sort", |b| {
        b.iter_batched(
            || input.to_vec(),
            |mut data| {
                msdsort_partial(PARTIAL_CHARS, black_box(&mut data));
                data.sort();
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("slice::sort (stable)", |b| {
        b.iter_batched(
            || input.to_vec(),
            |mut data| data.sort(),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("slice::sort_unstable", |b| {
        b.iter_batched(
            || input.to_vec(),
            |mut data| data.sort_unstable(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_strings(c: &mut Criterion) {
    let mut rng = rand::rng();
    let count = 10_000;

    let random_strings: Vec<String> = (0..count)
        .map(|_| {
            let len = rng.random_range(5..20);
            (0..len).map(|_| rng.random::<char>()).collect()
        })
        .collect();

    bench_group(c, "String Sort", &random_strings);
}

fn bench_long_prefix(c: &mut Criterion) {
    let mut rng = rand::rng();
    let count = 10_000;
    let prefix = "common_prefix_which_is_quite_long_indeed_";

    let input: Vec<String> = (0..count)
        .map(|_| {
            let suffix: String = (0..5).map(|_| rng.random::<char>()).collect();
            format!("{}{}", prefix, suffix)
        })
        .collect();

    bench_group(c, "Long Common Prefix", &input);
}

fn bench_identifiers(c: &mut Criterion) {
    // Method-name-like keys: many shared prefixes of varying length.
    let mut rng = rand::rng();
    let stems = ["sort", "binarySearch", "fill", "copyOf", "copyOfRange", "hashCode"];
    let types = ["Int", "Long", "Char", "Object", "Double", ""];

    let input: Vec<String> = (0..10_000)
        .map(|_| {
            let stem = stems[rng.random_range(0..stems.len())];
            let ty = types[rng.random_range(0..types.len())];
            format!("{}{}({})", stem, ty, rng.random_range(0..64))
        })
        .collect();

    bench_group(c, "Identifiers", &input);
}

criterion_group!(benches, bench_strings, bench_long_prefix, bench_identifiers);
criterion_main!(benches);
