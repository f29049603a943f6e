use std::cmp::Ordering;

/// The interface the generic tests drive. Implementations are expected to panic if the sort
/// reports an error.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering;

    /// Sorts `bytes` as consecutive elements of `elem_size` bytes each.
    fn sort_flat<F>(bytes: &mut [u8], elem_size: usize, compare: F)
    where
        F: FnMut(&[u8], &[u8]) -> Ordering;
}

pub mod patterns;
