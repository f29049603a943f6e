use std::cmp::Ordering;
use std::mem;
use std::ptr;

use crate::flat::FlatBuffer;
use crate::stats::{SortStats, StatsRecorder};
use crate::SortError;

sort_impl!("merge_sort_stable");

#[inline]
pub fn sort<T>(v: &mut [T]) -> Result<(), SortError>
where
    T: Ord,
{
    sort_by(v, T::cmp, None)
}

/// Top-down merge sort.
///
/// Every merge copies both runs into freshly allocated buffers and merges them back into `v`. The
/// buffers are reported as auxiliary memory while they live, so the peak is the size of the
/// whole input. If a buffer can not be allocated the sort stops with
/// [`SortError::AllocationFailed`] and `v` holds a permutation of its original elements.
pub fn sort_by<T, F>(
    v: &mut [T],
    mut compare: F,
    stats: Option<&mut SortStats>,
) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut rec = StatsRecorder::start(stats, mem::size_of::<T>(), v.len());

    let res = if mem::size_of::<T>() == 0 {
        Ok(())
    } else {
        merge_sort(v, &mut compare, &mut rec)
    };

    rec.finish();
    res
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

    let res = merge_sort_flat(buf, 0, len, &mut compare, &mut rec);

    rec.finish();
    res
}

/// Length of the left run when splitting `len` elements. The inclusive range `[0, len - 1]` is
/// split at `(len - 1) / 2`, which belongs to the left run.
#[inline]
fn left_run_len(len: usize) -> usize {
    (len - 1) / 2 + 1
}

fn merge_sort<T, F>(v: &mut [T], compare: &mut F, rec: &mut StatsRecorder) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len < 2 {
        return Ok(());
    }

    let mid = left_run_len(len);
    merge_sort(&mut v[..mid], compare, rec)?;
    merge_sort(&mut v[mid..], compare, rec)?;

    merge(v, mid, compare, rec)
}

fn try_alloc_buf<T>(len: usize) -> Result<Vec<T>, SortError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| {
        log::warn!(
            "merge sort failed to allocate scratch for {len} elements of {} bytes",
            mem::size_of::<T>()
        );
        SortError::AllocationFailed
    })?;

    Ok(buf)
}

/// Merges the non-decreasing runs `v[..mid]` and `v[mid..]`.
fn merge<T, F>(
    v: &mut [T],
    mid: usize,
    compare: &mut F,
    rec: &mut StatsRecorder,
) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    let right_len = len - mid;

    // The buffers never hold initialized elements from the point of view of `Vec`, so dropping
    // them only frees memory.
    let mut left_buf = try_alloc_buf::<T>(mid)?;
    let mut right_buf = try_alloc_buf::<T>(right_len)?;

    let scratch_bytes = len * mem::size_of::<T>();
    rec.alloc(scratch_bytes);

    // SAFETY: Both buffers have capacity for their run, T is not a zero-sized type and the runs are
    // non-empty because len >= 2.
    unsafe {
        let arr_ptr = v.as_mut_ptr();
        let left_ptr = left_buf.as_mut_ptr();
        let right_ptr = right_buf.as_mut_ptr();

        ptr::copy_nonoverlapping(arr_ptr, left_ptr, mid);
        ptr::copy_nonoverlapping(arr_ptr.add(mid), right_ptr, right_len);

        // Panic safety:
        //
        // If `compare` panics at any point during the process, `hole` will get dropped and fill
        // the hole in `v` with the unconsumed parts of both runs, thus ensuring that `v` still
        // holds every object it initially held exactly once.
        let mut hole = MergeHole {
            left: left_ptr,
            left_end: left_ptr.add(mid),
            right: right_ptr,
            right_end: right_ptr.add(right_len),
            dest: arr_ptr,
        };

        while hole.left < hole.left_end && hole.right < hole.right_end {
            rec.comparison();
            // If equal, prefer the left run to maintain stability.
            let to_copy = if compare(&*hole.left, &*hole.right) != Ordering::Greater {
                get_and_increment(&mut hole.left)
            } else {
                get_and_increment(&mut hole.right)
            };
            ptr::copy_nonoverlapping(to_copy, get_and_increment(&mut hole.dest), 1);
            rec.movement();
        }

        rec.movements(hole.remaining());
        // Finally, `hole` gets dropped and copies whatever remains of either run into `v`.
    }

    rec.free(scratch_bytes);
    Ok(())
}

unsafe fn get_and_increment<T>(ptr: &mut *mut T) -> *mut T {
    let old = *ptr;
    *ptr = unsafe { ptr.add(1) };
    old
}

// When dropped, copies the ranges `left..left_end` and `right..right_end` into `dest..`.
struct MergeHole<T> {
    left: *mut T,
    left_end: *mut T,
    right: *mut T,
    right_end: *mut T,
    dest: *mut T,
}

impl<T> MergeHole<T> {
    fn remaining(&self) -> usize {
        // SAFETY: Pointers into the same allocations, `T` is not a zero-sized type.
        unsafe {
            self.left_end.offset_from(self.left) as usize
                + self.right_end.offset_from(self.right) as usize
        }
    }
}

impl<T> Drop for MergeHole<T> {
    fn drop(&mut self) {
        // SAFETY: The scratch runs and `v` never overlap, and `dest..` has room for exactly the
        // unconsumed elements.
        unsafe {
            let left_len = self.left_end.offset_from(self.left) as usize;
            let right_len = self.right_end.offset_from(self.right) as usize;

            ptr::copy_nonoverlapping(self.left, self.dest, left_len);
            ptr::copy_nonoverlapping(self.right, self.dest.add(left_len), right_len);
        }
    }
}

// --- Flat buffer ---

fn merge_sort_flat<F>(
    buf: &mut FlatBuffer,
    start: usize,
    end: usize,
    compare: &mut F,
    rec: &mut StatsRecorder,
) -> Result<(), SortError>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    let len = end - start;
    if len < 2 {
        return Ok(());
    }

    let mid = start + left_run_len(len);
    merge_sort_flat(buf, start, mid, compare, rec)?;
    merge_sort_flat(buf, mid, end, compare, rec)?;

    merge_flat(buf, start, mid, end, compare, rec)
}

fn try_copy_bytes(src: &[u8]) -> Result<Vec<u8>, SortError> {
    let mut copy = Vec::new();
    copy.try_reserve_exact(src.len()).map_err(|_| {
        log::warn!("merge sort failed to allocate {} scratch bytes", src.len());
        SortError::AllocationFailed
    })?;
    copy.extend_from_slice(src);

    Ok(copy)
}

fn merge_flat<F>(
    buf: &mut FlatBuffer,
    start: usize,
    mid: usize,
    end: usize,
    compare: &mut F,
    rec: &mut StatsRecorder,
) -> Result<(), SortError>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    let elem_size = buf.elem_size();

    let left_run = try_copy_bytes(buf.range(start, mid - start))?;
    let right_run = try_copy_bytes(buf.range(mid, end - mid))?;

    let scratch_bytes = left_run.len() + right_run.len();
    rec.alloc(scratch_bytes);

    {
        let mut hole = FlatMergeHole {
            buf: &mut *buf,
            left: &left_run,
            right: &right_run,
            dest: start,
        };

        while !hole.left.is_empty() && !hole.right.is_empty() {
            let left = hole.left;
            let right = hole.right;

            rec.comparison();
            // If equal, prefer the left run to maintain stability.
            let src = if compare(&left[..elem_size], &right[..elem_size]) != Ordering::Greater {
                let (head, rest) = left.split_at(elem_size);
                hole.left = rest;
                head
            } else {
                let (head, rest) = right.split_at(elem_size);
                hole.right = rest;
                head
            };

            hole.buf.write(hole.dest, src);
            hole.dest += 1;
            rec.movement();
        }

        rec.movements((hole.left.len() + hole.right.len()) / elem_size);
    }

    rec.free(scratch_bytes);
    Ok(())
}

// When dropped, writes the unconsumed `left` and then `right` bytes into `buf` at element `dest`.
struct FlatMergeHole<'b, 'a> {
    buf: &'b mut FlatBuffer<'a>,
    left: &'b [u8],
    right: &'b [u8],
    dest: usize,
}

impl Drop for FlatMergeHole<'_, '_> {
    fn drop(&mut self) {
        let left_count = self.left.len() / self.buf.elem_size();

        self.buf.write_range(self.dest, self.left);
        self.buf.write_range(self.dest + left_count, self.right);
    }
}
