//! Frame-scoped allocator that alternates between two stacks.

use crate::allocator::{Allocator, StackAllocator};
use crate::block::MemoryBlock;
use crate::source::HeapMemory;

/// Double-buffered frame allocator.
///
/// Holds two equally sized bump-pointer frames and serves every call from
/// the active one. At a frame boundary, [`swap_buffers`] activates the
/// other frame and resets it, so anything allocated during one frame stays
/// readable for exactly one more frame: the classic scheme for data
/// produced in frame N and consumed in frame N+1.
///
/// [`swap_buffers`]: DoubleBufferedAllocator::swap_buffers
pub struct DoubleBufferedAllocator {
    frames: [StackAllocator<HeapMemory>; 2],
    current: usize,
}

impl DoubleBufferedAllocator {
    /// Creates two heap-backed frames of `size_per_frame` bytes each.
    pub fn new(size_per_frame: usize) -> Self {
        Self {
            frames: [
                StackAllocator::new(HeapMemory::new(size_per_frame)),
                StackAllocator::new(HeapMemory::new(size_per_frame)),
            ],
            current: 0,
        }
    }

    /// Activates the other frame and reclaims everything in it.
    ///
    /// # Safety
    ///
    /// Invalidates every block allocated two swaps ago (the frame being
    /// activated is reset). The caller must not use those blocks
    /// afterwards; blocks from the frame just left stay readable until
    /// the next swap.
    pub unsafe fn swap_buffers(&mut self) {
        self.current ^= 1;
        // SAFETY: blocks in the newly activated frame date from its
        // previous occupancy; per the contract above they are out of use.
        unsafe { self.frames[self.current].deallocate_all() };
    }

    /// The frame currently serving allocations.
    pub fn current_frame(&self) -> &StackAllocator<HeapMemory> {
        &self.frames[self.current]
    }

    /// Capacity of one frame.
    pub fn frame_capacity(&self) -> usize {
        self.frames[0].capacity()
    }
}

impl Allocator for DoubleBufferedAllocator {
    fn allocate(&mut self, size: usize) -> MemoryBlock {
        self.frames[self.current].allocate(size)
    }

    unsafe fn deallocate(&mut self, block: &mut MemoryBlock) -> bool {
        // SAFETY: same contract, forwarded to the active frame.
        unsafe { self.frames[self.current].deallocate(block) }
    }

    fn owns(&self, block: &MemoryBlock) -> bool {
        self.frames[self.current].owns(block)
    }
}
