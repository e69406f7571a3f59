use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// A violated geometry precondition.
///
/// Only construction reports it as a value (`try_new`, `try_from_slice`). Every
/// other operation treats it as a contract violation and panics through
/// [`handle_error`](Self::handle_error).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeometryError {
    #[error("stride of a view must be non-zero")]
    ZeroStride,

    #[error("fixed extent {fixed} does not match the supplied count {actual}")]
    ExtentMismatch { fixed: usize, actual: usize },

    #[error("fixed stride {fixed} does not match the supplied stride {actual}")]
    StrideMismatch { fixed: usize, actual: usize },

    #[error("{count} elements with stride {stride} do not fit in storage of length {len}")]
    OutOfBounds {
        count: usize,
        stride: usize,
        len: usize,
    },

    #[error("length of sub-view {requested} exceeds length of parent view {len}")]
    SubViewTooLong { requested: usize, len: usize },

    #[error("index out of range: the len is {len} but the index is {index}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot access the front or back element of an empty view")]
    Empty,

    #[error("skip factor must be non-zero")]
    ZeroSkip,

    #[error("stride {stride} skipped by {factor} overflows usize")]
    StrideOverflow { stride: usize, factor: usize },

    #[error("{count} elements with stride {stride} span more than isize::MAX bytes")]
    SpanOverflow { count: usize, stride: usize },
}

impl GeometryError {
    #[cold]
    #[inline(never)]
    #[track_caller]
    pub fn handle_error(&self) -> ! {
        log::error!("strided view contract violated: {self}");
        panic!("{self}");
    }
}
