//! Outcome codes shared by every sort entry point.
//!
//! The Rust API returns `Result<(), SortError>`. The C ABI returns [`SortResult`], a flat
//! `#[repr(i32)]` code where `Success` is zero and every failure is negative.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a sort call can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortError {
    /// A required buffer, comparison or swap function was not provided.
    NullPointer,

    /// The length is not valid for the buffer, e.g. the byte length of a flat buffer is not a
    /// multiple of the element size, or `len * elem_size` overflows.
    InvalidLength,

    /// Flat buffers need an element size of at least one byte.
    InvalidElementSize,

    /// A temporary buffer could not be allocated. The input is left as a permutation of the
    /// original elements, but not necessarily sorted.
    AllocationFailed,

    /// Reserved for concurrent variants. Never produced by this crate.
    ThreadFailed,
}

impl Display for SortError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NullPointer => write!(f, "Required buffer or function pointer is null"),
            Self::InvalidLength => write!(f, "Invalid length for the provided buffer"),
            Self::InvalidElementSize => write!(f, "Invalid element size: must be > 0"),
            Self::AllocationFailed => write!(f, "Failed to allocate temporary buffer"),
            Self::ThreadFailed => write!(f, "Worker thread failed"),
        }
    }
}

impl Error for SortError {}

/// C compatible outcome code.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortResult {
    Success = 0,
    NullPointer = -1,
    InvalidLength = -2,
    AllocationFailed = -3,
    ThreadFailed = -4,
    InvalidElementSize = -5,
}

impl SortResult {
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == SortResult::Success
    }

    pub fn into_result(self) -> Result<(), SortError> {
        match self {
            SortResult::Success => Ok(()),
            SortResult::NullPointer => Err(SortError::NullPointer),
            SortResult::InvalidLength => Err(SortError::InvalidLength),
            SortResult::AllocationFailed => Err(SortError::AllocationFailed),
            SortResult::ThreadFailed => Err(SortError::ThreadFailed),
            SortResult::InvalidElementSize => Err(SortError::InvalidElementSize),
        }
    }
}

impl From<SortError> for SortResult {
    fn from(err: SortError) -> Self {
        match err {
            SortError::NullPointer => SortResult::NullPointer,
            SortError::InvalidLength => SortResult::InvalidLength,
            SortError::InvalidElementSize => SortResult::InvalidElementSize,
            SortError::AllocationFailed => SortResult::AllocationFailed,
            SortError::ThreadFailed => SortResult::ThreadFailed,
        }
    }
}

impl From<Result<(), SortError>> for SortResult {
    fn from(res: Result<(), SortError>) -> Self {
        match res {
            Ok(()) => SortResult::Success,
            Err(err) => err.into(),
        }
    }
}
