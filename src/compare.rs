//! Comparison and swap functions.
//!
//! Every sort takes its comparison as `FnMut(&T, &T) -> Ordering`, or `FnMut(&[u8], &[u8]) ->
//! Ordering` for flat buffers. `Less`, `Equal` and `Greater` take the place of the negative, zero
//! and positive results of a C style comparison. The functions here are ready made comparisons for
//! common element types.

use std::cmp::Ordering;
use std::ffi::CStr;
use std::mem;

/// Maps a C style three-way result onto an [`Ordering`].
#[inline]
pub fn ordering_from_int(res: i32) -> Ordering {
    res.cmp(&0)
}

pub fn compare_integers<I: Ord>(a: &I, b: &I) -> Ordering {
    a.cmp(b)
}

/// Byte wise lexicographic order of two nul terminated strings, the same order `strcmp` yields.
pub fn compare_strings<S>(a: &S, b: &S) -> Ordering
where
    S: AsRef<CStr> + ?Sized,
{
    a.as_ref().to_bytes().cmp(b.as_ref().to_bytes())
}

pub fn swap_values<T>(a: &mut T, b: &mut T) {
    mem::swap(a, b);
}

macro_rules! flat_int_compare {
    ($($name:ident: $int:ty),*) => {
        $(
            #[doc = concat!("Compares two native endian `", stringify!($int), "` stored in a flat buffer.")]
            pub fn $name(a: &[u8], b: &[u8]) -> Ordering {
                const SIZE: usize = mem::size_of::<$int>();

                let mut a_bytes = [0u8; SIZE];
                let mut b_bytes = [0u8; SIZE];
                a_bytes.copy_from_slice(&a[..SIZE]);
                b_bytes.copy_from_slice(&b[..SIZE]);

                <$int>::from_ne_bytes(a_bytes).cmp(&<$int>::from_ne_bytes(b_bytes))
            }
        )*
    };
}

flat_int_compare!(
    compare_i32_bytes: i32,
    compare_i64_bytes: i64,
    compare_u32_bytes: u32,
    compare_u64_bytes: u64
);

#[cfg(test)]
mod tests {
    use super::*;

    use std::ffi::CString;

    #[test]
    fn integers() {
        assert_eq!(compare_integers(&1, &2), Ordering::Less);
        assert_eq!(compare_integers(&2, &2), Ordering::Equal);
        assert_eq!(compare_integers(&i64::MAX, &i64::MIN), Ordering::Greater);
    }

    #[test]
    fn int_results() {
        assert_eq!(ordering_from_int(-7), Ordering::Less);
        assert_eq!(ordering_from_int(0), Ordering::Equal);
        assert_eq!(ordering_from_int(i32::MAX), Ordering::Greater);
    }

    #[test]
    fn strings() {
        let apple = CString::new("apple").unwrap();
        let banana = CString::new("banana").unwrap();
        let app = CString::new("app").unwrap();

        assert_eq!(compare_strings(&apple, &banana), Ordering::Less);
        assert_eq!(compare_strings(&apple, &app), Ordering::Greater);
        assert_eq!(
            compare_strings(&apple.as_c_str(), &apple.as_c_str()),
            Ordering::Equal
        );

        // Bytes compare unsigned, like strcmp.
        let high = CString::new(vec![0xC3u8, 0xA9]).unwrap();
        assert_eq!(compare_strings(&apple, &high), Ordering::Less);
    }

    #[test]
    fn flat_ints() {
        let a = (-5i32).to_ne_bytes();
        let b = 3i32.to_ne_bytes();
        assert_eq!(compare_i32_bytes(&a, &b), Ordering::Less);
        assert_eq!(compare_i32_bytes(&b, &a), Ordering::Greater);
        assert_eq!(compare_i32_bytes(&a, &a), Ordering::Equal);

        // Only the leading bytes matter, the rest may be payload.
        let mut rec_a = u64::MAX.to_ne_bytes().to_vec();
        rec_a.extend_from_slice(&[1, 2, 3]);
        let mut rec_b = 0u64.to_ne_bytes().to_vec();
        rec_b.extend_from_slice(&[9, 9, 9]);
        assert_eq!(compare_u64_bytes(&rec_a, &rec_b), Ordering::Greater);
        assert_eq!(
            compare_i64_bytes(&rec_a, &rec_b),
            (-1i64).cmp(&0),
        );
    }

    #[test]
    fn swap() {
        let mut a = 1;
        let mut b = 2;
        swap_values(&mut a, &mut b);
        assert_eq!((a, b), (2, 1));
    }
}
