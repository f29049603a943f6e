//! Sorts a generated input with every algorithm and prints the statistics report for each run.
//!
//! `DEMO_LEN` sets the input length (default 1000), `DEMO_PATTERN` one of `random`, `ascending`,
//! `descending`, `all_equal`, `saws` or `pipe_organ` (default `random`).

use std::env;
use std::process;

use log::{error, info};

use classic_sort::stable::{binary_insertion, insertion, merge};
use classic_sort::unstable::{selection, shell};
use classic_sort::{FlatBuffer, SortAlgorithm, SortError, SortStats};
use sort_test_tools::patterns;

const DEFAULT_LEN: usize = 1000;

fn pattern_by_name(name: &str) -> Option<fn(usize) -> Vec<i32>> {
    let provider: fn(usize) -> Vec<i32> = match name {
        "random" => patterns::random,
        "ascending" => patterns::ascending,
        "descending" => patterns::descending,
        "all_equal" => patterns::all_equal,
        "saws" => |len| patterns::saw_mixed(len, ((len as f64).log2().round()) as usize),
        "pipe_organ" => patterns::pipe_organ,
        _ => return None,
    };

    Some(provider)
}

fn run<A: SortAlgorithm>(input: &[i32]) -> Result<(), SortError> {
    let name = A::name();

    let mut v = input.to_vec();
    let mut stats = SortStats::new();
    classic_sort::enable_stats();
    A::sort_by(&mut v, i32::cmp, Some(&mut stats))?;
    println!("--- {name} (stats enabled) ---\n{stats}\n");

    let mut v = input.to_vec();
    classic_sort::disable_stats();
    A::sort_by(&mut v, i32::cmp, Some(&mut stats))?;
    println!("--- {name} (stats disabled) ---\n{stats}\n");

    let mut bytes: Vec<u8> = input.iter().flat_map(|val| val.to_ne_bytes()).collect();
    let mut buf = FlatBuffer::new(&mut bytes, 4)?;
    classic_sort::enable_stats();
    A::sort_flat(&mut buf, classic_sort::compare_i32_bytes, Some(&mut stats))?;
    classic_sort::disable_stats();
    println!("--- {name} flat ---\n{stats}\n");

    Ok(())
}

fn run_all(input: &[i32]) -> Result<(), SortError> {
    run::<insertion::SortImpl>(input)?;
    run::<binary_insertion::SortImpl>(input)?;
    run::<merge::SortImpl>(input)?;
    run::<selection::SortImpl>(input)?;
    run::<shell::SortImpl>(input)?;

    let mut v = input.to_vec();
    let mut stats = SortStats::new();
    classic_sort::enable_stats();
    insertion::sort_ints(&mut v, Some(&mut stats))?;
    classic_sort::disable_stats();
    println!("--- insertion_sort_int ---\n{stats}\n");

    Ok(())
}

fn main() {
    env_logger::init();

    let len = match env::var("DEMO_LEN") {
        Ok(val) => match val.parse::<usize>() {
            Ok(len) => len,
            Err(err) => {
                error!("DEMO_LEN={val} is not a length: {err}");
                process::exit(1);
            }
        },
        Err(_) => DEFAULT_LEN,
    };

    let pattern_name = env::var("DEMO_PATTERN").unwrap_or_else(|_| "random".to_string());
    let Some(pattern) = pattern_by_name(&pattern_name) else {
        error!("Unknown DEMO_PATTERN={pattern_name}");
        process::exit(1);
    };

    info!("Sorting {len} {pattern_name} elements with classic_sort {}", classic_sort::version());

    let res = classic_sort::init().and_then(|()| run_all(&pattern(len)));
    classic_sort::cleanup();

    if let Err(err) = res {
        error!("Sort failed: {err}");
        process::exit(1);
    }
}
