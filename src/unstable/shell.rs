use std::cmp::Ordering;
use std::mem;

use crate::flat::FlatBuffer;
use crate::stats::{SortStats, StatsRecorder};
use crate::SortError;

sort_impl!("shell_sort_unstable");

/// Largest gap of the `1, 4, 13, 40, 121, ...` sequence used for `len` elements.
///
/// Grows `h = 3h + 1` starting from 1 for as long as `h < len / 3`.
pub fn initial_gap(len: usize) -> usize {
    let mut gap = 1;
    while gap < len / 3 {
        gap = 3 * gap + 1;
    }

    gap
}

#[inline]
pub fn sort<T>(v: &mut [T]) -> Result<(), SortError>
where
    T: Ord,
{
    sort_by(v, T::cmp, None)
}

/// Shell sort with Knuth's gap sequence.
///
/// Each pass is an insertion sort over elements `gap` apart, done with swaps. One movement is
/// counted per swap.
pub fn sort_by<T, F>(
    v: &mut [T],
    mut compare: F,
    stats: Option<&mut SortStats>,
) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    let mut rec = StatsRecorder::start(stats, mem::size_of::<T>(), len);

    let mut gap = initial_gap(len);
    while gap >= 1 {
        for i in gap..len {
            let mut j = i;
            while j >= gap {
                rec.comparison();
                if compare(&v[j - gap], &v[j]) != Ordering::Greater {
                    break;
                }

                v.swap(j - gap, j);
                rec.movement();
                j -= gap;
            }
        }

        gap /= 3;
    }

    rec.finish();
    Ok(())
}

pub fn sort_flat<F>(
    buf: &mut FlatBuffer,
    mut compare: F,
    stats: Option<&mut SortStats>,
) -> Result<(), SortError>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    let len = buf.len();
    let mut rec = StatsRecorder::start(stats, buf.elem_size(), len);

    let mut gap = initial_gap(len);
    while gap >= 1 {
        for i in gap..len {
            let mut j = i;
            while j >= gap {
                rec.comparison();
                if compare(buf.get(j - gap), buf.get(j)) != Ordering::Greater {
                    break;
                }

                buf.swap(j - gap, j);
                rec.movement();
                j -= gap;
            }
        }

        gap /= 3;
    }

    rec.finish();
    Ok(())
}
