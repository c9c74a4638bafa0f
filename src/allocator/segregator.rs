//! Size-based composition of two allocators.

use super::Allocator;
use crate::block::MemoryBlock;

/// Routes requests by size: at most `threshold` bytes to the smaller
/// allocator, everything above to the larger one.
///
/// There is no fallback between the branches; a request that fails in
/// its branch fails outright. Deallocation and ownership repeat the size
/// comparison on `block.size`, which reproduces the allocation-time
/// decision because blocks record the originally requested size, never a
/// rounded-up internal one.
///
/// Segregators nest: both branches may themselves be segregators or
/// fallbacks, which is how size-class allocator trees are built.
pub struct SegregatorAllocator<S: Allocator, L: Allocator> {
    smaller: S,
    larger: L,
    threshold: usize,
}

impl<S: Allocator, L: Allocator> SegregatorAllocator<S, L> {
    pub fn new(threshold: usize, smaller: S, larger: L) -> Self {
        Self {
            smaller,
            larger,
            threshold,
        }
    }

    /// The routing boundary: requests of up to this many bytes go to the
    /// smaller allocator.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn smaller(&self) -> &S {
        &self.smaller
    }

    pub fn smaller_mut(&mut self) -> &mut S {
        &mut self.smaller
    }

    pub fn larger(&self) -> &L {
        &self.larger
    }

    pub fn larger_mut(&mut self) -> &mut L {
        &mut self.larger
    }
}

impl<S: Allocator, L: Allocator> Allocator for SegregatorAllocator<S, L> {
    fn allocate(&mut self, size: usize) -> MemoryBlock {
        if size <= self.threshold {
            self.smaller.allocate(size)
        } else {
            self.larger.allocate(size)
        }
    }

    unsafe fn deallocate(&mut self, block: &mut MemoryBlock) -> bool {
        // SAFETY: the size comparison repeats the routing decision made at
        // allocation time, so the block reaches the delegate it came from.
        unsafe {
            if block.size <= self.threshold {
                self.smaller.deallocate(block)
            } else {
                self.larger.deallocate(block)
            }
        }
    }

    fn owns(&self, block: &MemoryBlock) -> bool {
        if block.size <= self.threshold {
            self.smaller.owns(block)
        } else {
            self.larger.owns(block)
        }
    }
}
