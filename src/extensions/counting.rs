//! Observing wrapper that tallies allocator traffic.

use crate::allocator::Allocator;
use crate::block::MemoryBlock;

/// Statistics snapshot taken from a [`CountingAllocator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocatorStats {
    /// Successful allocations since construction (or the last reset).
    pub allocation_count: usize,
    /// Successful deallocations since construction (or the last reset).
    pub deallocation_count: usize,
    /// Bytes currently outstanding, by requested size.
    pub used_size: usize,
    /// Highest value `used_size` has reached.
    pub peak_size: usize,
}

/// Wraps an allocator and tallies its traffic.
///
/// Every call is forwarded to the inner allocator unchanged and the
/// outcome is observed, never altered: a request that would fail without
/// the wrapper fails identically with it. Only successful operations
/// move the counters, so leaks show up as a lasting gap between
/// allocation and deallocation counts (or a non-zero `used_size` at
/// teardown).
pub struct CountingAllocator<A: Allocator> {
    inner: A,
    stats: AllocatorStats,
}

impl<A: Allocator> CountingAllocator<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            stats: AllocatorStats::default(),
        }
    }

    /// Current counters.
    pub fn stats(&self) -> AllocatorStats {
        self.stats
    }

    /// Zeroes the counters; outstanding blocks are unaffected.
    pub fn reset_statistics(&mut self) {
        self.stats = AllocatorStats::default();
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut A {
        &mut self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: Allocator> Allocator for CountingAllocator<A> {
    fn allocate(&mut self, size: usize) -> MemoryBlock {
        let block = self.inner.allocate(size);
        if block.is_valid() {
            self.stats.allocation_count += 1;
            self.stats.used_size += block.size;
            if self.stats.used_size > self.stats.peak_size {
                self.stats.peak_size = self.stats.used_size;
            }
        }
        block
    }

    unsafe fn deallocate(&mut self, block: &mut MemoryBlock) -> bool {
        // The inner allocator resets the block on success; its size has to
        // be taken before forwarding.
        let size = block.size;
        // SAFETY: same contract, forwarded to the inner allocator.
        let released = unsafe { self.inner.deallocate(block) };
        if released {
            self.stats.deallocation_count += 1;
            self.stats.used_size -= size;
        }
        released
    }

    fn owns(&self, block: &MemoryBlock) -> bool {
        self.inner.owns(block)
    }
}
