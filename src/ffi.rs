//! C ABI over the sort implementations, built into the `staticlib`.
//!
//! Comparison functions follow the `strcmp` convention and receive pointers to two elements.
//! Indirection arrays hand the stored element pointers to the comparison, flat buffers hand
//! pointers to the elements inside the buffer. A null `stats` pointer disables statistics for the
//! call.

use std::ffi::{c_char, c_int, c_void, CStr};
use std::mem;
use std::slice;

use crate::compare::ordering_from_int;
use crate::flat::FlatBuffer;
use crate::stable::{binary_insertion, insertion, merge};
use crate::stats::SortStats;
use crate::unstable::{selection, shell};
use crate::{SortAlgorithm, SortError, SortResult};

pub type CompareFn = unsafe extern "C" fn(*const c_void, *const c_void) -> c_int;

/// Exchanges the contents of two elements.
pub type SwapFn = unsafe extern "C" fn(*mut c_void, *mut c_void);

static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// # Safety
///
/// `arr` must be null or valid for reads and writes of `len` pointers for `'a`.
unsafe fn indirect_slice<'a>(
    arr: *mut *mut c_void,
    len: usize,
) -> Result<&'a mut [*mut c_void], SortError> {
    if arr.is_null() {
        return Err(SortError::NullPointer);
    }

    if len > isize::MAX as usize / mem::size_of::<*mut c_void>() {
        return Err(SortError::InvalidLength);
    }

    // SAFETY: Non-null, the caller guarantees `len` valid and exclusively owned entries.
    Ok(unsafe { slice::from_raw_parts_mut(arr, len) })
}

unsafe fn sort_indirect<S: SortAlgorithm>(
    arr: *mut *mut c_void,
    len: usize,
    cmp: Option<CompareFn>,
    stats: *mut SortStats,
) -> Result<(), SortError> {
    let v = unsafe { indirect_slice(arr, len) }?;
    let cmp = cmp.ok_or(SortError::NullPointer)?;
    let stats = unsafe { stats.as_mut() };

    S::sort_by(
        v,
        |a, b| ordering_from_int(unsafe { cmp(*a as *const c_void, *b as *const c_void) }),
        stats,
    )
}

unsafe fn sort_flat_raw<S: SortAlgorithm>(
    base: *mut c_void,
    len: usize,
    elem_size: usize,
    cmp: Option<CompareFn>,
    stats: *mut SortStats,
) -> Result<(), SortError> {
    let mut buf = unsafe { FlatBuffer::from_raw_parts(base.cast::<u8>(), len, elem_size) }?;
    let cmp = cmp.ok_or(SortError::NullPointer)?;
    let stats = unsafe { stats.as_mut() };

    S::sort_flat(
        &mut buf,
        |a, b| ordering_from_int(unsafe { cmp(a.as_ptr().cast(), b.as_ptr().cast()) }),
        stats,
    )
}

macro_rules! indirect_sort_impl {
    ($($algo:ident: $sort:ty),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Sorts `len` element pointers with ", stringify!($algo), " sort.")]
                ///
                /// # Safety
                ///
                /// `arr` must be null or valid for reads and writes of `len` pointers, each of which
                /// must be valid input for `cmp`.
                #[no_mangle]
                pub unsafe extern "C" fn [<csort_ $algo _sort>](
                    arr: *mut *mut c_void,
                    len: usize,
                    cmp: Option<CompareFn>,
                    stats: *mut SortStats,
                ) -> SortResult {
                    unsafe { sort_indirect::<$sort>(arr, len, cmp, stats) }.into()
                }
            )*
        }
    };
}

macro_rules! flat_sort_impl {
    ($($algo:ident: $sort:ty),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Sorts `len` elements of `elem_size` bytes stored at `base` with ", stringify!($algo), " sort.")]
                ///
                /// # Safety
                ///
                /// `base` must be null or valid for reads and writes of `len * elem_size` bytes.
                #[no_mangle]
                pub unsafe extern "C" fn [<csort_ $algo _sort_flat>](
                    base: *mut c_void,
                    len: usize,
                    elem_size: usize,
                    cmp: Option<CompareFn>,
                    stats: *mut SortStats,
                ) -> SortResult {
                    unsafe { sort_flat_raw::<$sort>(base, len, elem_size, cmp, stats) }.into()
                }
            )*
        }
    };
}

indirect_sort_impl!(
    insertion: insertion::SortImpl,
    binary_insertion: binary_insertion::SortImpl,
    merge: merge::SortImpl,
    shell: shell::SortImpl,
);

flat_sort_impl!(
    insertion: insertion::SortImpl,
    binary_insertion: binary_insertion::SortImpl,
    merge: merge::SortImpl,
    shell: shell::SortImpl,
    selection: selection::SortImpl,
);

/// Selection sort over element pointers. `swap` exchanges the contents of the two pointed to
/// elements, the pointer array itself is left untouched.
///
/// # Safety
///
/// `arr` must be null or valid for reads of `len` pointers, each of which must be valid input for
/// `cmp` and `swap`.
#[no_mangle]
pub unsafe extern "C" fn csort_selection_sort(
    arr: *mut *mut c_void,
    len: usize,
    cmp: Option<CompareFn>,
    swap: Option<SwapFn>,
    stats: *mut SortStats,
) -> SortResult {
    let res = (|| -> Result<(), SortError> {
        let v = unsafe { indirect_slice(arr, len) }?;
        let cmp = cmp.ok_or(SortError::NullPointer)?;
        let swap = swap.ok_or(SortError::NullPointer)?;
        let stats = unsafe { stats.as_mut() };

        selection::sort_by_with_swap(
            v,
            |a, b| ordering_from_int(unsafe { cmp(*a as *const c_void, *b as *const c_void) }),
            |a, b| unsafe { swap(*a, *b) },
            stats,
        )
    })();

    res.into()
}

/// # Safety
///
/// `arr` must be null or valid for reads and writes of `len` integers.
#[no_mangle]
pub unsafe extern "C" fn csort_insertion_sort_int(
    arr: *mut c_int,
    len: usize,
    stats: *mut SortStats,
) -> SortResult {
    if arr.is_null() {
        return SortResult::NullPointer;
    }

    if len > isize::MAX as usize / mem::size_of::<c_int>() {
        return SortResult::InvalidLength;
    }

    // SAFETY: See function safety comment.
    let v = unsafe { slice::from_raw_parts_mut(arr, len) };
    let stats = unsafe { stats.as_mut() };

    insertion::sort_ints(v, stats).into()
}

#[no_mangle]
pub extern "C" fn csort_enable_stats() {
    crate::enable_stats();
}

#[no_mangle]
pub extern "C" fn csort_disable_stats() {
    crate::disable_stats();
}

#[no_mangle]
pub extern "C" fn csort_is_stats_enabled() -> bool {
    crate::is_stats_enabled()
}

/// Compares two `int` values.
///
/// # Safety
///
/// Both pointers must point to valid `int` values.
#[no_mangle]
pub unsafe extern "C" fn csort_compare_integers(a: *const c_void, b: *const c_void) -> c_int {
    let (a, b) = unsafe { (&*a.cast::<c_int>(), &*b.cast::<c_int>()) };
    crate::compare_integers(a, b) as c_int
}

/// Compares two `char *` values, as stored in an array of strings.
///
/// # Safety
///
/// Both pointers must point to pointers to nul terminated strings.
#[no_mangle]
pub unsafe extern "C" fn csort_compare_strings(a: *const c_void, b: *const c_void) -> c_int {
    let (a, b) = unsafe {
        (
            CStr::from_ptr(*a.cast::<*const c_char>()),
            CStr::from_ptr(*b.cast::<*const c_char>()),
        )
    };
    crate::compare_strings(a, b) as c_int
}

/// Nul terminated version string with static lifetime.
#[no_mangle]
pub extern "C" fn csort_version() -> *const c_char {
    VERSION.as_ptr().cast()
}

#[no_mangle]
pub extern "C" fn csort_init() -> SortResult {
    crate::init().into()
}

#[no_mangle]
pub extern "C" fn csort_cleanup() {
    crate::cleanup();
}
