use std::env;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use classic_sort::stable::{binary_insertion, insertion, merge};
use classic_sort::unstable::{selection, shell};
use classic_sort::{FlatBuffer, SortAlgorithm, SortStats};

use sort_test_tools::patterns;

#[inline(never)]
fn bench_sort<T: Ord>(
    c: &mut Criterion,
    test_size: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
    bench_name: &str,
    sort_func: impl Fn(&mut [T]),
) {
    let batch_size = if test_size > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    c.bench_function(
        &format!("{bench_name}-{transform_name}-{pattern_name}-{test_size}"),
        |b| {
            b.iter_batched(
                || transform(pattern_provider(test_size)),
                |mut test_data| sort_func(black_box(test_data.as_mut_slice())),
                batch_size,
            )
        },
    );
}

#[inline(never)]
fn bench_sort_flat<Sort: SortAlgorithm>(
    c: &mut Criterion,
    test_size: usize,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
) {
    let bench_name = Sort::name();

    c.bench_function(
        &format!("{bench_name}-flat_i32-{pattern_name}-{test_size}"),
        |b| {
            b.iter_batched(
                || {
                    pattern_provider(test_size)
                        .into_iter()
                        .flat_map(i32::to_ne_bytes)
                        .collect::<Vec<u8>>()
                },
                |mut bytes| {
                    let mut buf = FlatBuffer::new(black_box(&mut bytes), 4).unwrap();
                    Sort::sort_flat(&mut buf, classic_sort::compare_i32_bytes, None).unwrap();
                },
                BatchSize::LargeInput,
            )
        },
    );
}

fn measure_counts(name: &str, test_size: usize, sort_func: impl Fn(&mut SortStats)) {
    // Measure how many comparisons and element movements are performed by a specific
    // implementation and input combination.
    let run_count: usize = if test_size <= 20 {
        10_000
    } else if test_size < 1_000 {
        300
    } else {
        10
    };

    let mut comparisons = 0;
    let mut movements = 0;
    let mut max_memory_used = 0;

    for _ in 0..run_count {
        let mut stats = SortStats::new();
        sort_func(&mut stats);

        comparisons += stats.comparisons;
        movements += stats.movements;
        max_memory_used = max_memory_used.max(stats.max_memory_used);
    }

    println!(
        "{name}: mean comparisons: {} mean movements: {} max memory: {max_memory_used}",
        comparisons / run_count,
        movements / run_count,
    );
}

#[inline(never)]
fn bench_impl<T: Ord, Sort: SortAlgorithm>(
    c: &mut Criterion,
    test_size: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
) {
    let bench_name = Sort::name();

    if env::var("MEASURE_COMP").is_ok() {
        // The counts don't depend on the type, only on the input order.
        if transform_name == "i32" {
            let name = format!("{bench_name}-comp-{transform_name}-{pattern_name}-{test_size}");

            classic_sort::enable_stats();
            measure_counts(&name, test_size, |stats| {
                let mut test_data = transform(pattern_provider(test_size));
                Sort::sort_by(black_box(test_data.as_mut_slice()), T::cmp, Some(stats)).unwrap();
            });
            classic_sort::disable_stats();
        }
    } else {
        bench_sort(
            c,
            test_size,
            transform_name,
            transform,
            pattern_name,
            pattern_provider,
            &bench_name,
            |v| Sort::sort(v).unwrap(),
        );
    }
}

fn bench_patterns<T: Ord>(
    c: &mut Criterion,
    test_size: usize,
    transform_name: &str,
    transform: fn(Vec<i32>) -> Vec<T>,
) {
    if test_size > 2_048 && transform_name != "i32" {
        // Quadratic sorts on heap types at this size take minutes per pattern.
        return;
    }

    let pattern_providers: Vec<(&'static str, fn(usize) -> Vec<i32>)> = vec![
        ("random", patterns::random),
        ("random_dense", |size| {
            patterns::random_uniform(size, 0..=(((size as f64).log2().round()) as i32))
        }),
        ("random_binary", |size| patterns::random_uniform(size, 0..=1)),
        ("random_sorted_95", |size| patterns::random_sorted(size, 95.0)),
        ("ascending", patterns::ascending),
        ("descending", patterns::descending),
        ("saws_long", |size| {
            patterns::saw_mixed(size, ((size as f64).log2().round()) as usize)
        }),
        ("pipe_organ", patterns::pipe_organ),
    ];

    for (pattern_name, pattern_provider) in pattern_providers.iter() {
        if test_size < 3 && *pattern_name != "random" {
            continue;
        }

        // --- Stable sorts ---

        bench_impl::<T, insertion::SortImpl>(
            c,
            test_size,
            transform_name,
            &transform,
            pattern_name,
            pattern_provider,
        );

        bench_impl::<T, binary_insertion::SortImpl>(
            c,
            test_size,
            transform_name,
            &transform,
            pattern_name,
            pattern_provider,
        );

        bench_impl::<T, merge::SortImpl>(
            c,
            test_size,
            transform_name,
            &transform,
            pattern_name,
            pattern_provider,
        );

        // --- Unstable sorts ---

        bench_impl::<T, selection::SortImpl>(
            c,
            test_size,
            transform_name,
            &transform,
            pattern_name,
            pattern_provider,
        );

        bench_impl::<T, shell::SortImpl>(
            c,
            test_size,
            transform_name,
            &transform,
            pattern_name,
            pattern_provider,
        );

        // --- Flat buffers ---

        if transform_name == "i32" && env::var("MEASURE_COMP").is_err() {
            bench_sort_flat::<insertion::SortImpl>(c, test_size, pattern_name, pattern_provider);
            bench_sort_flat::<merge::SortImpl>(c, test_size, pattern_name, pattern_provider);
            bench_sort_flat::<shell::SortImpl>(c, test_size, pattern_name, pattern_provider);
        }

        // The dedicated integer insertion sort, compared against its generic counterpart above.
        if transform_name == "i32" && env::var("MEASURE_COMP").is_err() {
            let identity: fn(Vec<i32>) -> Vec<i32> = |values| values;
            bench_sort(
                c,
                test_size,
                transform_name,
                &identity,
                pattern_name,
                pattern_provider,
                "insertion_sort_int",
                |v| insertion::sort_ints(v, None).unwrap(),
            );
        }
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let test_sizes = [
        0, 1, 2, 3, 5, 7, 8, 9, 11, 13, 15, 16, 17, 19, 20, 24, 28, 31, 36, 50, 101, 200, 500,
        1_000, 2_048, 10_000,
    ];

    patterns::use_random_seed_each_time();

    for test_size in test_sizes {
        // Basic type often used to test sorting algorithms.
        bench_patterns(c, test_size, "i32", |values| values);

        // Common type for usize on 64-bit machines.
        // Sorting indices is very common.
        bench_patterns(c, test_size, "u64", |values| {
            values
                .iter()
                .map(|val| -> u64 {
                    // Extends the value into the 64 bit range,
                    // while preserving input order.
                    let x = ((*val as i64) + (i32::MAX as i64) + 1) as u64;
                    x.checked_mul(i32::MAX as u64).unwrap()
                })
                .collect()
        });

        // Larger type that is not Copy and does heap access.
        bench_patterns(c, test_size, "string", |values| {
            // Zero extend to keep the input order under lexicographic comparison.
            values
                .iter()
                .map(|val| format!("{:010}", val.saturating_abs()))
                .collect()
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
