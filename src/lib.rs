//! Classic comparison sorts with optional instrumentation.
//!
//! Every algorithm lives in its own module under [`stable`] or [`unstable`] and offers the same
//! entry points:
//!
//! - `sort(v)` for `T: Ord`,
//! - `sort_by(v, compare, stats)` for any `T` with a caller supplied comparison,
//! - `sort_flat(buf, compare, stats)` for a [`FlatBuffer`] of fixed size byte elements.
//!
//! Passing `Some(&mut SortStats)` collects comparison, movement, memory and timing counters, but
//! only while [`enable_stats`] is in effect.

macro_rules! sort_impl {
    ($name:expr) => {
        pub struct SortImpl;

        impl $crate::SortAlgorithm for SortImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn sort<T>(v: &mut [T]) -> Result<(), SortError>
            where
                T: Ord,
            {
                sort(v)
            }

            #[inline]
            fn sort_by<T, F>(
                v: &mut [T],
                compare: F,
                stats: Option<&mut SortStats>,
            ) -> Result<(), SortError>
            where
                F: FnMut(&T, &T) -> Ordering,
            {
                sort_by(v, compare, stats)
            }

            #[inline]
            fn sort_flat<F>(
                buf: &mut FlatBuffer,
                compare: F,
                stats: Option<&mut SortStats>,
            ) -> Result<(), SortError>
            where
                F: FnMut(&[u8], &[u8]) -> Ordering,
            {
                sort_flat(buf, compare, stats)
            }
        }
    };
}

pub mod compare;
pub mod error;
pub mod ffi;
pub mod flat;
pub mod stable;
pub mod stats;
pub mod unstable;

use std::cmp::Ordering;

pub use compare::{
    compare_i32_bytes, compare_i64_bytes, compare_integers, compare_strings, compare_u32_bytes,
    compare_u64_bytes, ordering_from_int, swap_values,
};
pub use error::{SortError, SortResult};
pub use flat::{element_offset, FlatBuffer};
pub use stats::{
    disable_stats, enable_stats, is_stats_enabled, SortStats, StatsRecorder, CLOCK_RESOLUTION,
};

/// Uniform access to the sort implementations, one `SortImpl` per algorithm module.
pub trait SortAlgorithm {
    fn name() -> String;

    fn sort<T>(v: &mut [T]) -> Result<(), SortError>
    where
        T: Ord;

    fn sort_by<T, F>(
        v: &mut [T],
        compare: F,
        stats: Option<&mut SortStats>,
    ) -> Result<(), SortError>
    where
        F: FnMut(&T, &T) -> Ordering;

    fn sort_flat<F>(
        buf: &mut FlatBuffer,
        compare: F,
        stats: Option<&mut SortStats>,
    ) -> Result<(), SortError>
    where
        F: FnMut(&[u8], &[u8]) -> Ordering;
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Present for symmetry with [`cleanup`], there is no global state to set up.
pub fn init() -> Result<(), SortError> {
    log::debug!("classic_sort {} initialized", version());
    Ok(())
}

pub fn cleanup() {
    log::debug!("classic_sort cleaned up");
}
