//! Error types for the fallible parts of the crate surface.
//!
//! Allocation failure itself is not an error here: `allocate` reports
//! exhaustion through the empty block and `deallocate` through its boolean
//! result, because running out of a fixed budget is an expected outcome of
//! allocation pressure. [`MemoryError`] covers the view-carving API, where
//! an out-of-range request is ordinary caller input.

use thiserror::Error;

/// Memory toolkit errors.
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    /// A requested view window does not fit inside its source.
    #[error("view range out of bounds: offset {offset} + {size} bytes exceeds {available} byte source")]
    ViewOutOfBounds {
        offset: usize,
        size: usize,
        available: usize,
    },

    /// A view split point lies past the end of the view.
    #[error("split point {at} out of bounds of {size} byte view")]
    SplitOutOfBounds { at: usize, size: usize },
}

/// Result type for memory operations.
pub type MemoryResult<T> = core::result::Result<T, MemoryError>;
