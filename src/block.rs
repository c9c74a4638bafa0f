//! The block value handed out by allocators.

use core::ptr;

/// One in-flight allocation: a raw pointer plus the originally requested
/// size in bytes.
///
/// A block is either *valid* (non-null pointer, non-zero size) or the
/// canonical empty state `{null, 0}`; allocators never produce any other
/// combination. Blocks are plain tokens with no lifetime attached: the
/// caller is responsible for handing a block back to the allocator that
/// produced it. Equality is structural.
///
/// The recorded size is the size the caller asked for, not any internal
/// rounded-up figure. Size-based routing (see
/// [`SegregatorAllocator`](crate::allocator::SegregatorAllocator)) relies
/// on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBlock {
    /// Start of the allocation, or null for the empty block.
    pub ptr: *mut u8,
    /// Requested size in bytes, or 0 for the empty block.
    pub size: usize,
}

impl MemoryBlock {
    /// The empty block: null pointer, zero size.
    pub const EMPTY: Self = Self {
        ptr: ptr::null_mut(),
        size: 0,
    };

    /// Builds a block from its parts.
    ///
    /// `ptr` must be null exactly when `size` is zero; the two degenerate
    /// halves (`{null, n}`, `{ptr, 0}`) are not representable states.
    #[inline]
    pub fn new(ptr: *mut u8, size: usize) -> Self {
        debug_assert!(
            ptr.is_null() == (size == 0),
            "a block is either fully valid or fully empty"
        );
        Self { ptr, size }
    }

    /// Whether this block describes a live allocation.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.ptr.is_null() && self.size > 0
    }

    /// Returns the block to the empty state.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// One-past-the-end pointer of the allocation.
    #[inline]
    pub fn end_ptr(&self) -> *const u8 {
        (self.ptr as usize + self.size) as *const u8
    }
}

impl Default for MemoryBlock {
    fn default() -> Self {
        Self::EMPTY
    }
}
