use std::cmp::Ordering;
use std::mem;

use crate::flat::FlatBuffer;
use crate::stats::{SortStats, StatsRecorder};
use crate::SortError;

sort_impl!("binary_insertion_sort_stable");

#[inline]
pub fn sort<T>(v: &mut [T]) -> Result<(), SortError>
where
    T: Ord,
{
    sort_by(v, T::cmp, None)
}

/// Insertion sort that locates the insertion point with a binary search.
///
/// Comparisons drop to *O*(*n* \* log(*n*)), the element shifts and therefore the movement count
/// stay the same as for [`insertion::sort_by`](super::insertion::sort_by).
pub fn sort_by<T, F>(
    v: &mut [T],
    mut compare: F,
    stats: Option<&mut SortStats>,
) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut rec = StatsRecorder::start(stats, mem::size_of::<T>(), v.len());

    if mem::size_of::<T>() != 0 {
        for i in 1..v.len() {
            let (sorted, tail) = v.split_at(i);
            let pos = upper_bound(i, |mid| compare(&sorted[mid], &tail[0]), &mut rec);

            if pos != i {
                // All comparisons are done, nothing can panic while shifting.
                v[pos..=i].rotate_right(1);
                rec.movements(i - pos + 1);
            }
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
    let elem_size = buf.elem_size();
    let mut rec = StatsRecorder::start(stats, elem_size, len);

    for i in 1..len {
        let pos = {
            let key = buf.get(i);
            upper_bound(i, |mid| compare(buf.get(mid), key), &mut rec)
        };

        if pos != i {
            buf.rotate_right_one(pos, i);
            rec.movements(i - pos + 1);
        }
    }

    rec.finish();
    Ok(())
}

/// Returns the first index in `0..len` whose element compares `Greater` than the key, or `len`.
///
/// `cmp_at(mid)` compares the element at `mid` with the key. Equal elements send the search to the
/// right, so the key ends up behind them and the sort stays stable.
fn upper_bound<P>(len: usize, mut cmp_at: P, rec: &mut StatsRecorder) -> usize
where
    P: FnMut(usize) -> Ordering,
{
    let mut left = 0;
    let mut right = len;

    while left < right {
        let mid = left + (right - left) / 2;

        rec.comparison();
        if cmp_at(mid) == Ordering::Greater {
            right = mid;
        } else {
            left = mid + 1;
        }
    }

    left
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_bound_ties_go_right() {
        let sorted = [1, 2, 2, 2, 5];
        let mut rec = StatsRecorder::disabled();

        let pos_of = |key: i32, rec: &mut StatsRecorder| {
            upper_bound(sorted.len(), |mid| sorted[mid].cmp(&key), rec)
        };

        assert_eq!(pos_of(0, &mut rec), 0);
        assert_eq!(pos_of(2, &mut rec), 4);
        assert_eq!(pos_of(3, &mut rec), 4);
        assert_eq!(pos_of(5, &mut rec), 5);
        assert_eq!(pos_of(9, &mut rec), 5);
    }
}
