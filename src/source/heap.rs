//! Heap-backed memory source.

use core::ptr;

use super::MemorySource;
use crate::raw;

/// Alignment `malloc` guarantees for ordinary requests.
const MALLOC_ALIGNMENT: usize = 16;

/// A source that owns a region obtained from the system heap.
///
/// Construction acquires the region once; drop releases it exactly once,
/// through the release routine matching the acquisition path (plain or
/// aligned). A zero-byte request or an allocation failure produces an
/// empty source rather than an error; allocators over an empty source
/// just report exhaustion.
///
/// Not `Clone`: two owners of one heap region would release it twice.
pub struct HeapMemory {
    ptr: *mut u8,
    size: usize,
    alignment: usize,
    user_aligned: bool,
}

impl HeapMemory {
    /// Allocates `bytes` from the heap with the default `malloc` alignment.
    pub fn new(bytes: usize) -> Self {
        let ptr = raw::heap_alloc(bytes);
        if ptr.is_null() {
            #[cfg(feature = "logging")]
            if bytes > 0 {
                tracing::warn!(bytes, "heap source allocation failed");
            }
            return Self::empty();
        }
        Self {
            ptr,
            size: bytes,
            alignment: MALLOC_ALIGNMENT,
            user_aligned: false,
        }
    }

    /// Allocates `bytes` aligned to `alignment` via the bookkeeping-byte
    /// scheme in [`raw::aligned_alloc`].
    ///
    /// # Panics
    ///
    /// `alignment` must be a power of two within
    /// [`raw::MIN_ALIGNMENT`]..=[`raw::MAX_ALIGNMENT`].
    pub fn with_alignment(bytes: usize, alignment: usize) -> Self {
        let ptr = raw::aligned_alloc(bytes, alignment);
        if ptr.is_null() {
            #[cfg(feature = "logging")]
            if bytes > 0 {
                tracing::warn!(bytes, alignment, "aligned heap source allocation failed");
            }
            return Self::empty();
        }
        Self {
            ptr,
            size: bytes,
            alignment,
            user_aligned: true,
        }
    }

    /// The empty source: nothing acquired, nothing to release.
    fn empty() -> Self {
        Self {
            ptr: ptr::null_mut(),
            size: 0,
            alignment: 0,
            user_aligned: false,
        }
    }

    /// Whether construction actually acquired a region.
    pub fn is_empty(&self) -> bool {
        self.ptr.is_null()
    }
}

impl MemorySource for HeapMemory {
    fn as_ptr(&self) -> *mut u8 {
        self.ptr
    }

    fn size(&self) -> usize {
        self.size
    }

    fn alignment(&self) -> usize {
        self.alignment
    }

    fn owns_memory(&self) -> bool {
        !self.ptr.is_null()
    }
}

impl Drop for HeapMemory {
    fn drop(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        // SAFETY: ptr came from the matching acquisition routine in the
        // constructor and is released exactly once here.
        unsafe {
            if self.user_aligned {
                raw::aligned_free(self.ptr);
            } else {
                raw::heap_free(self.ptr);
            }
        }
    }
}
