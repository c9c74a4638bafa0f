//! Trivial terminal allocators.

use super::Allocator;
use crate::block::MemoryBlock;

/// Allocator that never allocates.
///
/// The safe "no allocation available" default: every request fails, every
/// deallocation is refused, nothing is ever owned.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAllocator;

impl Allocator for NullAllocator {
    fn allocate(&mut self, _size: usize) -> MemoryBlock {
        MemoryBlock::EMPTY
    }

    unsafe fn deallocate(&mut self, _block: &mut MemoryBlock) -> bool {
        false
    }

    fn owns(&self, _block: &MemoryBlock) -> bool {
        false
    }
}

/// Allocator that must never be exercised.
///
/// Used to seal off a branch of a composition that is supposed to be
/// unreachable, say the above-threshold side of a segregator when large
/// requests are forbidden by design. Reaching it is a programming error,
/// so both operations panic instead of reporting failure the caller might
/// silently absorb.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForbiddenAllocator;

impl Allocator for ForbiddenAllocator {
    fn allocate(&mut self, size: usize) -> MemoryBlock {
        panic!("allocation of {size} bytes reached a forbidden allocator");
    }

    unsafe fn deallocate(&mut self, _block: &mut MemoryBlock) -> bool {
        panic!("deallocation reached a forbidden allocator");
    }

    fn owns(&self, _block: &MemoryBlock) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_allocator_always_fails() {
        let mut allocator = NullAllocator;
        for size in [0usize, 1, 2, 4, 8, 16, 32, 64, 128] {
            assert!(!allocator.allocate(size).is_valid());
        }
    }

    #[test]
    fn null_allocator_refuses_every_block() {
        let mut allocator = NullAllocator;
        let mut data = 0u32;
        let mut empty = MemoryBlock::EMPTY;
        let mut foreign = MemoryBlock::new((&raw mut data).cast::<u8>(), size_of::<u32>());

        // SAFETY: NullAllocator never touches the block.
        unsafe {
            assert!(!allocator.deallocate(&mut empty));
            assert!(!allocator.deallocate(&mut foreign));
        }
        // The refused block is left untouched.
        assert!(foreign.is_valid());
        assert!(!allocator.owns(&empty));
        assert!(!allocator.owns(&foreign));
    }

    #[test]
    #[should_panic(expected = "forbidden allocator")]
    fn forbidden_allocator_panics_on_allocate() {
        let mut allocator = ForbiddenAllocator;
        let _ = allocator.allocate(10);
    }

    #[test]
    #[should_panic(expected = "forbidden allocator")]
    fn forbidden_allocator_panics_on_deallocate() {
        let mut allocator = ForbiddenAllocator;
        let mut block = MemoryBlock::EMPTY;
        // SAFETY: panics before touching the block.
        let _ = unsafe { allocator.deallocate(&mut block) };
    }

    #[test]
    fn forbidden_allocator_owns_nothing() {
        let allocator = ForbiddenAllocator;
        assert!(!allocator.owns(&MemoryBlock::EMPTY));
    }
}
