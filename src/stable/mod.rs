pub mod binary_insertion;
pub mod insertion;

// Allocates scratch for every merge, the only sort that can fail with `AllocationFailed`.
pub mod merge;
