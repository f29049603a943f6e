use std::cmp::Ordering;
use std::mem::{self, ManuallyDrop};
use std::ptr;

use crate::flat::FlatBuffer;
use crate::stats::{SortStats, StatsRecorder};
use crate::SortError;

sort_impl!("insertion_sort_stable");

#[inline]
pub fn sort<T>(v: &mut [T]) -> Result<(), SortError>
where
    T: Ord,
{
    sort_by(v, T::cmp, None)
}

/// Classic insertion sort, shifting every greater predecessor one slot to the right.
///
/// Counts one comparison per call of `compare` and one movement per shifted element, plus one for
/// placing the key if it moved. Already sorted input costs `len - 1` comparisons and no
/// movements.
pub fn sort_by<T, F>(
    v: &mut [T],
    mut compare: F,
    stats: Option<&mut SortStats>,
) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut rec = StatsRecorder::start(stats, mem::size_of::<T>(), v.len());

    if v.len() >= 2 && mem::size_of::<T>() != 0 {
        for i in 1..v.len() {
            // SAFETY: 1 <= i < v.len().
            unsafe {
                insert_tail(&mut v[..=i], &mut compare, &mut rec);
            }
        }
    }

    rec.finish();
    Ok(())
}

/// Insertion sort over a flat buffer, the key is held in a scratch buffer of one element.
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

    if len >= 2 {
        let mut key = vec![0u8; elem_size];
        rec.alloc(elem_size);

        for i in 1..len {
            rec.comparison();
            if compare(buf.get(i - 1), buf.get(i)) != Ordering::Greater {
                continue;
            }

            key.copy_from_slice(buf.get(i));

            // If `compare` panics, `hole` writes the key back and the buffer keeps every element
            // exactly once.
            let mut hole = FlatKeyHole {
                buf: &mut *buf,
                key: &key,
                dest: i - 1,
            };
            hole.buf.copy_within(i - 1, i);
            rec.movement();

            while hole.dest > 0 {
                rec.comparison();
                if compare(hole.buf.get(hole.dest - 1), hole.key) != Ordering::Greater {
                    break;
                }

                hole.buf.copy_within(hole.dest - 1, hole.dest);
                rec.movement();
                hole.dest -= 1;
            }

            rec.movement();
            // `hole` gets dropped and copies the key into its final slot.
        }

        rec.free(elem_size);
    }

    rec.finish();
    Ok(())
}

/// Primitive integers, compared by value.
pub trait NativeInt: Copy + Ord + private::Sealed {}

mod private {
    pub trait Sealed {}
}

macro_rules! impl_native_int {
    ($($int:ty),*) => {
        $(
            impl private::Sealed for $int {}
            impl NativeInt for $int {}
        )*
    };
}

impl_native_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Insertion sort specialized for primitive integers.
///
/// Produces the same output and the same comparison and movement counts as [`sort_by`] with
/// [`compare_integers`](crate::compare_integers).
pub fn sort_ints<I>(v: &mut [I], stats: Option<&mut SortStats>) -> Result<(), SortError>
where
    I: NativeInt,
{
    let mut rec = StatsRecorder::start(stats, mem::size_of::<I>(), v.len());

    for i in 1..v.len() {
        let key = v[i];
        let mut j = i;

        while j > 0 {
            rec.comparison();
            if v[j - 1] <= key {
                break;
            }

            v[j] = v[j - 1];
            rec.movement();
            j -= 1;
        }

        if j != i {
            v[j] = key;
            rec.movement();
        }
    }

    rec.finish();
    Ok(())
}

// When dropped, copies from `src` into `dest`.
struct InsertionHole<T> {
    src: *const T,
    dest: *mut T,
}

impl<T> Drop for InsertionHole<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::copy_nonoverlapping(self.src, self.dest, 1);
        }
    }
}

/// Inserts `v[v.len() - 1]` into pre-sorted sequence `v[..v.len() - 1]` so that whole `v[..]`
/// becomes sorted.
///
/// # Safety
///
/// `v.len() >= 2`.
unsafe fn insert_tail<T, F>(v: &mut [T], compare: &mut F, rec: &mut StatsRecorder)
where
    F: FnMut(&T, &T) -> Ordering,
{
    debug_assert!(v.len() >= 2);

    let arr_ptr = v.as_mut_ptr();
    let i = v.len() - 1;

    unsafe {
        let i_ptr = arr_ptr.add(i);

        rec.comparison();
        if compare(&*i_ptr.sub(1), &*i_ptr) != Ordering::Greater {
            return;
        }

        // From here on the key is only observed through `tmp`, the value that gets copied back.
        let tmp = ManuallyDrop::new(ptr::read(i_ptr));

        // Intermediate state of the insertion process is always tracked by `hole`, which
        // serves two purposes:
        // 1. Protects integrity of `v` from panics in `compare`.
        // 2. Fills the remaining hole in `v` in the end.
        let mut hole = InsertionHole {
            src: &*tmp,
            dest: i_ptr.sub(1),
        };
        ptr::copy_nonoverlapping(hole.dest, i_ptr, 1);
        rec.movement();

        for j in (0..(i - 1)).rev() {
            let j_ptr = arr_ptr.add(j);

            rec.comparison();
            if compare(&*j_ptr, &*tmp) != Ordering::Greater {
                break;
            }

            ptr::copy_nonoverlapping(j_ptr, hole.dest, 1);
            rec.movement();
            hole.dest = j_ptr;
        }

        rec.movement();
        // `hole` gets dropped and thus copies `tmp` into the remaining hole in `v`.
    }
}

// When dropped, writes `key` into element `dest` of `buf`.
struct FlatKeyHole<'b, 'a> {
    buf: &'b mut FlatBuffer<'a>,
    key: &'b [u8],
    dest: usize,
}

impl Drop for FlatKeyHole<'_, '_> {
    fn drop(&mut self) {
        self.buf.write(self.dest, self.key);
    }
}
