//! Stride addressed byte buffers.
//!
//! A [`FlatBuffer`] is one contiguous block of memory holding `len` elements of `elem_size` bytes
//! each. The flat sort variants only ever see the elements as `&[u8]` of that size and move them
//! around with byte copies.

use std::mem;
use std::slice;

use crate::SortError;

/// Byte offset of element `index` for elements of `elem_size` bytes.
#[inline(always)]
pub const fn element_offset(elem_size: usize, index: usize) -> usize {
    index * elem_size
}

pub struct FlatBuffer<'a> {
    bytes: &'a mut [u8],
    elem_size: usize,
}

impl<'a> FlatBuffer<'a> {
    pub fn new(bytes: &'a mut [u8], elem_size: usize) -> Result<Self, SortError> {
        if elem_size == 0 {
            return Err(SortError::InvalidElementSize);
        }

        if bytes.len() % elem_size != 0 {
            return Err(SortError::InvalidLength);
        }

        Ok(Self { bytes, elem_size })
    }

    /// Builds a buffer of `len` elements of `elem_size` bytes starting at `base`.
    ///
    /// # Safety
    ///
    /// If `base` is not null it must be valid for reads and writes of `len * elem_size` bytes for
    /// `'a`, and nothing else may access that memory during `'a`.
    pub unsafe fn from_raw_parts(
        base: *mut u8,
        len: usize,
        elem_size: usize,
    ) -> Result<Self, SortError> {
        if base.is_null() {
            return Err(SortError::NullPointer);
        }

        if elem_size == 0 {
            return Err(SortError::InvalidElementSize);
        }

        let byte_len = len
            .checked_mul(elem_size)
            .filter(|byte_len| *byte_len <= isize::MAX as usize)
            .ok_or(SortError::InvalidLength)?;

        // SAFETY: See function safety comment.
        let bytes = unsafe { slice::from_raw_parts_mut(base, byte_len) };

        Ok(Self { bytes, elem_size })
    }

    /// Views a typed slice as a flat buffer with `elem_size == size_of::<T>()`.
    ///
    /// # Safety
    ///
    /// `T` must not contain padding bytes, and any byte permutation the comparison function lets
    /// through must leave every element a valid `T`. Whole element moves, which is all the flat
    /// sorts do, satisfy the latter for any `T: Copy`.
    pub unsafe fn from_typed<T: Copy>(v: &'a mut [T]) -> Result<Self, SortError> {
        let elem_size = mem::size_of::<T>();
        if elem_size == 0 {
            return Err(SortError::InvalidElementSize);
        }

        // SAFETY: `v` is a valid exclusive borrow of `v.len() * elem_size` bytes, see the function
        // safety comment for the padding requirement.
        let bytes =
            unsafe { slice::from_raw_parts_mut(v.as_mut_ptr() as *mut u8, mem::size_of_val(v)) };

        Ok(Self { bytes, elem_size })
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len() / self.elem_size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn elem_size(&self) -> usize {
        self.elem_size
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes
    }

    #[inline]
    pub fn get(&self, index: usize) -> &[u8] {
        let start = element_offset(self.elem_size, index);
        &self.bytes[start..start + self.elem_size]
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut [u8] {
        let start = element_offset(self.elem_size, index);
        &mut self.bytes[start..start + self.elem_size]
    }

    /// The bytes of `count` elements starting at element `start`.
    #[inline]
    pub fn range(&self, start: usize, count: usize) -> &[u8] {
        let byte_start = element_offset(self.elem_size, start);
        &self.bytes[byte_start..byte_start + element_offset(self.elem_size, count)]
    }

    /// Overwrites element `index` with `src`, which must be exactly one element long.
    #[inline]
    pub fn write(&mut self, index: usize, src: &[u8]) {
        self.get_mut(index).copy_from_slice(src);
    }

    /// Overwrites the elements starting at `index` with `src`, a whole number of elements.
    #[inline]
    pub fn write_range(&mut self, index: usize, src: &[u8]) {
        let byte_start = element_offset(self.elem_size, index);
        self.bytes[byte_start..byte_start + src.len()].copy_from_slice(src);
    }

    /// Copies element `src` over element `dest`.
    #[inline]
    pub fn copy_within(&mut self, src: usize, dest: usize) {
        let src_start = element_offset(self.elem_size, src);
        self.bytes.copy_within(
            src_start..src_start + self.elem_size,
            element_offset(self.elem_size, dest),
        );
    }

    /// Moves element `end` to `start` and shifts the elements `start..end` up by one slot.
    #[inline]
    pub fn rotate_right_one(&mut self, start: usize, end: usize) {
        let byte_start = element_offset(self.elem_size, start);
        let byte_end = element_offset(self.elem_size, end + 1);
        self.bytes[byte_start..byte_end].rotate_right(self.elem_size);
    }

    /// Exchanges the elements `a` and `b`. Swapping an element with itself does nothing.
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let elem_size = self.elem_size;

        // `hi` starts the tail, so the two ranges are disjoint.
        let (head, tail) = self.bytes.split_at_mut(element_offset(elem_size, hi));
        let lo_start = element_offset(elem_size, lo);
        head[lo_start..lo_start + elem_size].swap_with_slice(&mut tail[..elem_size]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_bytes(vals: &[i32]) -> Vec<u8> {
        vals.iter().flat_map(|val| val.to_ne_bytes()).collect()
    }

    fn from_bytes(bytes: &[u8]) -> Vec<i32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| i32::from_ne_bytes(chunk.try_into().unwrap()))
            .collect()
    }

    #[test]
    fn offsets() {
        assert_eq!(element_offset(4, 0), 0);
        assert_eq!(element_offset(4, 3), 12);
        assert_eq!(element_offset(24, 2), 48);
    }

    #[test]
    fn construction_errors() {
        let mut bytes = [0u8; 10];
        assert_eq!(
            FlatBuffer::new(&mut bytes, 0).err(),
            Some(SortError::InvalidElementSize)
        );
        assert_eq!(
            FlatBuffer::new(&mut bytes, 4).err(),
            Some(SortError::InvalidLength)
        );

        let buf = FlatBuffer::new(&mut bytes, 5).unwrap();
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.elem_size(), 5);

        let res = unsafe { FlatBuffer::from_raw_parts(std::ptr::null_mut(), 4, 4) };
        assert_eq!(res.err(), Some(SortError::NullPointer));

        let res = unsafe { FlatBuffer::from_raw_parts(bytes.as_mut_ptr(), usize::MAX, 2) };
        assert_eq!(res.err(), Some(SortError::InvalidLength));

        let mut units = [(), ()];
        let res = unsafe { FlatBuffer::from_typed(&mut units) };
        assert_eq!(res.err(), Some(SortError::InvalidElementSize));
    }

    #[test]
    fn empty() {
        let mut bytes: [u8; 0] = [];
        let buf = FlatBuffer::new(&mut bytes, 8).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn access_and_swap() {
        let mut bytes = to_bytes(&[10, 20, 30, 40]);
        let mut buf = FlatBuffer::new(&mut bytes, 4).unwrap();

        assert_eq!(buf.len(), 4);
        assert_eq!(buf.get(2), &30i32.to_ne_bytes());

        buf.swap(0, 3);
        buf.swap(2, 1);
        buf.swap(1, 1);
        assert_eq!(from_bytes(buf.as_bytes()), [40, 30, 20, 10]);

        buf.copy_within(0, 2);
        assert_eq!(from_bytes(buf.as_bytes()), [40, 30, 40, 10]);

        buf.write(0, &7i32.to_ne_bytes());
        assert_eq!(from_bytes(buf.range(0, 2)), [7, 30]);

        buf.write_range(2, &to_bytes(&[1, 2]));
        assert_eq!(from_bytes(buf.as_bytes()), [7, 30, 1, 2]);

        buf.rotate_right_one(1, 3);
        assert_eq!(from_bytes(buf.as_bytes()), [7, 2, 30, 1]);
    }

    #[test]
    fn large_stride_swap() {
        // Larger than any small stack scratch, and strides that are not a power of two.
        let elem_size = 131;
        let mut bytes: Vec<u8> = (0..3)
            .flat_map(|i| std::iter::repeat(i as u8).take(elem_size))
            .collect();
        let mut buf = FlatBuffer::new(&mut bytes, elem_size).unwrap();

        buf.swap(2, 0);
        assert!(buf.get(0).iter().all(|b| *b == 2));
        assert!(buf.get(1).iter().all(|b| *b == 1));
        assert!(buf.get(2).iter().all(|b| *b == 0));
    }

    #[test]
    fn typed_view() {
        let mut vals = [3i64, -1, 2];
        let buf = unsafe { FlatBuffer::from_typed(&mut vals) }.unwrap();
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.elem_size(), 8);
        assert_eq!(buf.get(1), &(-1i64).to_ne_bytes());
    }
}
