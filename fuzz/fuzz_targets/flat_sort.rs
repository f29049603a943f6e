#![no_main]

use libfuzzer_sys::fuzz_target;

use classic_sort_fuzz::check_flat;

fuzz_target!(|data: &[u8]| {
    // The first byte picks the element size, the rest are the elements.
    if let Some((&stride, rest)) = data.split_first() {
        let elem_size = (stride as usize % 24) + 1;
        check_flat(rest, elem_size);
    }
});
