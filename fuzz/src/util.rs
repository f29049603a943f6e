use std::cmp::Ordering;
use std::mem;

use classic_sort::stable::{binary_insertion, insertion, merge};
use classic_sort::unstable::{selection, shell};
use classic_sort::{FlatBuffer, SortAlgorithm};

/// Reads native endian `i32` values from the fuzzer input, dropping a trailing partial value.
pub fn u8_as_i32(data: &[u8]) -> Vec<i32> {
    data.chunks_exact(mem::size_of::<i32>())
        .map(|chunk| i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Compares flat elements by their first byte only, so most inputs contain equal keys with
/// distinct payloads.
pub fn compare_first_byte(a: &[u8], b: &[u8]) -> Ordering {
    a[0].cmp(&b[0])
}

pub fn check_sorted<T: Ord>(v: &[T]) {
    for window in v.windows(2) {
        assert!(window[0] <= window[1]);
    }
}

/// Sorts `data` as flat elements of `elem_size` bytes with every algorithm and checks the result
/// against a stable reference sort of the same elements.
pub fn check_flat(data: &[u8], elem_size: usize) {
    let usable = data.len() - (data.len() % elem_size);
    let input = &data[..usable];

    let mut expected: Vec<&[u8]> = input.chunks_exact(elem_size).collect();
    expected.sort_by(|a, b| compare_first_byte(a, b));
    let expected: Vec<u8> = expected.concat();

    check_flat_with::<insertion::SortImpl>(input, elem_size, &expected, true);
    check_flat_with::<binary_insertion::SortImpl>(input, elem_size, &expected, true);
    check_flat_with::<merge::SortImpl>(input, elem_size, &expected, true);
    check_flat_with::<selection::SortImpl>(input, elem_size, &expected, false);
    check_flat_with::<shell::SortImpl>(input, elem_size, &expected, false);
}

fn check_flat_with<A: SortAlgorithm>(input: &[u8], elem_size: usize, expected: &[u8], stable: bool) {
    let mut bytes = input.to_vec();
    let mut buf = FlatBuffer::new(&mut bytes, elem_size).unwrap();
    A::sort_flat(&mut buf, compare_first_byte, None).unwrap();

    if stable {
        assert_eq!(bytes, expected, "{}", A::name());
    } else {
        let mut got: Vec<&[u8]> = bytes.chunks_exact(elem_size).collect();
        let mut want: Vec<&[u8]> = expected.chunks_exact(elem_size).collect();

        let keys = |elems: &[&[u8]]| elems.iter().map(|elem| elem[0]).collect::<Vec<_>>();
        assert_eq!(keys(&got), keys(&want), "{}", A::name());

        got.sort();
        want.sort();
        assert_eq!(got, want, "{}", A::name());
    }
}
