#![no_main]

use libfuzzer_sys::fuzz_target;

use classic_sort::stable::{binary_insertion, insertion, merge};
use classic_sort::unstable::{selection, shell};
use classic_sort::SortAlgorithm;
use classic_sort_fuzz::{check_sorted, u8_as_i32};

fn run<A: SortAlgorithm>(input: &[i32]) -> Vec<i32> {
    let mut v = input.to_vec();
    A::sort(&mut v).unwrap();
    check_sorted(&v);

    v
}

fuzz_target!(|data: &[u8]| {
    let input = u8_as_i32(data);

    let expected = run::<merge::SortImpl>(&input);
    assert_eq!(run::<insertion::SortImpl>(&input), expected);
    assert_eq!(run::<binary_insertion::SortImpl>(&input), expected);
    assert_eq!(run::<selection::SortImpl>(&input), expected);
    assert_eq!(run::<shell::SortImpl>(&input), expected);

    let mut ints = input.clone();
    insertion::sort_ints(&mut ints, None).unwrap();
    assert_eq!(ints, expected);
});
