//! System-heap allocator.

use super::Allocator;
use crate::block::MemoryBlock;
use crate::raw;

/// Allocator that delegates directly to the C heap.
///
/// The terminal general-purpose branch of a composition: no fixed budget
/// and no locality guarantees, just `malloc`/`free`.
///
/// Ownership tracking is intentionally not provided at this layer: a heap
/// pointer carries no mark distinguishing it from pointers issued
/// elsewhere, so `owns` always returns `false`. In a fallback composition
/// this makes the heap the implicit "everything else" branch.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mallocator;

impl Allocator for Mallocator {
    fn allocate(&mut self, size: usize) -> MemoryBlock {
        if size == 0 {
            return MemoryBlock::EMPTY;
        }
        let ptr = raw::heap_alloc(size);
        if ptr.is_null() {
            #[cfg(feature = "logging")]
            tracing::debug!(size, "heap allocation failed");
            return MemoryBlock::EMPTY;
        }
        MemoryBlock::new(ptr, size)
    }

    unsafe fn deallocate(&mut self, block: &mut MemoryBlock) -> bool {
        if !block.is_valid() {
            return false;
        }
        // SAFETY: per the deallocate contract, a valid block passed here
        // came from `allocate` above, i.e. from the C heap, and has not
        // been released since.
        unsafe { raw::heap_free(block.ptr) };
        block.reset();
        true
    }

    fn owns(&self, _block: &MemoryBlock) -> bool {
        false
    }
}
