use std::cmp::Ordering;
use std::mem;

use crate::flat::FlatBuffer;
use crate::stats::{SortStats, StatsRecorder};
use crate::SortError;

sort_impl!("selection_sort_unstable");

#[inline]
pub fn sort<T>(v: &mut [T]) -> Result<(), SortError>
where
    T: Ord,
{
    sort_by(v, T::cmp, None)
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], compare: F, stats: Option<&mut SortStats>) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_by_with_swap(v, compare, mem::swap, stats)
}

/// Selection sort that exchanges elements through `swap`.
///
/// Always performs `len * (len - 1) / 2` comparisons. Every position is filled with the first
/// minimum of the unsorted tail, and one movement is counted per call of `swap`. `swap` is never
/// called with the same element twice.
pub fn sort_by_with_swap<T, F, S>(
    v: &mut [T],
    mut compare: F,
    mut swap: S,
    stats: Option<&mut SortStats>,
) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
    S: FnMut(&mut T, &mut T),
{
    let len = v.len();
    let mut rec = StatsRecorder::start(stats, mem::size_of::<T>(), len);

    for i in 0..len.saturating_sub(1) {
        let min = min_index(i, len, |a, b| compare(&v[a], &v[b]), &mut rec);

        if min != i {
            let (head, tail) = v.split_at_mut(min);
            swap(&mut head[i], &mut tail[0]);
            rec.movement();
        }
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

    for i in 0..len.saturating_sub(1) {
        let min = min_index(i, len, |a, b| compare(buf.get(a), buf.get(b)), &mut rec);

        if min != i {
            buf.swap(i, min);
            rec.movement();
        }
    }

    rec.finish();
    Ok(())
}

/// Index of the first minimum in `start..end`. `compare(a, b)` compares the elements at the
/// indices `a` and `b`.
fn min_index<F>(start: usize, end: usize, mut compare: F, rec: &mut StatsRecorder) -> usize
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut min = start;

    for j in (start + 1)..end {
        rec.comparison();
        if compare(j, min) == Ordering::Less {
            min = j;
        }
    }

    min
}
