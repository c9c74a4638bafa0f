//! Bump-pointer allocator with LIFO reclamation.

use super::Allocator;
use crate::block::MemoryBlock;
use crate::source::MemorySource;
use crate::utils::checked_align_up;

/// Bump-pointer allocator over a memory source.
///
/// Allocation advances a single cursor through the source; deallocation is
/// accepted only for the most recently allocated block, enforcing strict
/// LIFO discipline. Refusing an out-of-order deallocation is the intended
/// behavior of a stack allocator, not an error to recover from: the
/// caller either releases in reverse order or tears everything down with
/// [`deallocate_all`](StackAllocator::deallocate_all).
///
/// Each allocation advances the cursor by the request rounded up to the
/// source alignment, so every block starts on an aligned address; the
/// block itself records the unrounded size the caller asked for.
///
/// The cursor is an offset from the source base rather than an absolute
/// address, so an allocator that owns its source (including an
/// [`InlineMemory`](crate::source::InlineMemory)) stays valid when the
/// value moves.
pub struct StackAllocator<S: MemorySource> {
    source: S,
    cursor: usize,
}

impl<S: MemorySource> StackAllocator<S> {
    pub fn new(source: S) -> Self {
        Self { source, cursor: 0 }
    }

    /// Consumes the entire remaining capacity as a single block.
    pub fn allocate_all(&mut self) -> MemoryBlock {
        let remaining = self.available();
        if remaining == 0 {
            return MemoryBlock::EMPTY;
        }
        let ptr = (self.source.as_ptr() as usize + self.cursor) as *mut u8;
        self.cursor = self.source.size();
        MemoryBlock::new(ptr, remaining)
    }

    /// Resets the cursor to the source base, reclaiming everything at
    /// once. Memory is not zeroed.
    ///
    /// # Safety
    ///
    /// Invalidates every block previously issued by this allocator; the
    /// caller must not use any of them afterwards.
    pub unsafe fn deallocate_all(&mut self) {
        self.cursor = 0;
    }

    /// Bytes consumed so far, including alignment padding.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Bytes still available. `used() + available()` always equals
    /// [`capacity`](StackAllocator::capacity).
    pub fn available(&self) -> usize {
        self.source.size() - self.cursor
    }

    /// Total capacity, i.e. the source size.
    pub fn capacity(&self) -> usize {
        self.source.size()
    }

    /// Alignment every block start is rounded to.
    pub fn alignment(&self) -> usize {
        self.source.alignment()
    }

    /// The source this allocator carves from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The request rounded up to the source alignment; `None` on wrap.
    fn aligned_request(&self, size: usize) -> Option<usize> {
        checked_align_up(size, self.source.alignment().max(1))
    }
}

impl<S: MemorySource> Allocator for StackAllocator<S> {
    fn allocate(&mut self, size: usize) -> MemoryBlock {
        if size == 0 {
            return MemoryBlock::EMPTY;
        }
        let Some(aligned) = self.aligned_request(size) else {
            return MemoryBlock::EMPTY;
        };
        if aligned > self.available() {
            #[cfg(feature = "logging")]
            tracing::debug!(
                size,
                available = self.available(),
                "stack allocator exhausted"
            );
            return MemoryBlock::EMPTY;
        }
        let ptr = (self.source.as_ptr() as usize + self.cursor) as *mut u8;
        self.cursor += aligned;
        MemoryBlock::new(ptr, size)
    }

    unsafe fn deallocate(&mut self, block: &mut MemoryBlock) -> bool {
        if !block.is_valid() {
            return false;
        }
        let base = self.source.as_ptr() as usize;
        let addr = block.ptr as usize;
        if addr < base {
            return false;
        }
        let offset = addr - base;
        let Some(aligned) = self.aligned_request(block.size) else {
            return false;
        };
        // Only the block sitting on top of the stack can be released.
        if offset.checked_add(aligned) != Some(self.cursor) {
            return false;
        }
        self.cursor = offset;
        block.reset();
        true
    }

    fn owns(&self, block: &MemoryBlock) -> bool {
        // Owned blocks lie inside the consumed region, below the cursor,
        // not in capacity that has yet to be handed out.
        self.source.owns_block(block)
            && (block.ptr as usize) < self.source.as_ptr() as usize + self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{InlineMemory, NullMemory};

    #[test]
    fn allocations_are_lifo() {
        let region = InlineMemory::<256>::new();
        let mut stack = StackAllocator::new(&region);

        let mut first = stack.allocate(24);
        let mut second = stack.allocate(40);
        assert!(first.is_valid());
        assert!(second.is_valid());

        // SAFETY: both blocks came from this allocator.
        unsafe {
            assert!(!stack.deallocate(&mut first), "not the top of the stack");
            assert!(first.is_valid(), "refused block is untouched");

            assert!(stack.deallocate(&mut second));
            assert!(!second.is_valid());

            assert!(stack.deallocate(&mut first));
            assert!(!first.is_valid());
        }
        assert_eq!(stack.used(), 0);
    }

    #[test]
    fn cursor_advances_by_aligned_size() {
        let region = InlineMemory::<256>::new();
        let mut stack = StackAllocator::new(&region);

        let block = stack.allocate(10);
        assert_eq!(block.size, 10, "block records the requested size");
        assert_eq!(stack.used(), 16, "cursor advances by the aligned size");

        let next = stack.allocate(1);
        assert_eq!(next.ptr as usize % 16, 0);
    }

    #[test]
    fn used_plus_available_is_capacity() {
        let region = InlineMemory::<256>::new();
        let mut stack = StackAllocator::new(&region);

        for size in [1usize, 17, 40, 16, 200, 3] {
            let _ = stack.allocate(size);
            assert_eq!(stack.used() + stack.available(), stack.capacity());
        }
    }

    #[test]
    fn allocate_all_takes_the_rest() {
        let region = InlineMemory::<256>::new();
        let mut stack = StackAllocator::new(&region);

        let _ = stack.allocate(64);
        let rest = stack.allocate_all();
        assert!(rest.is_valid());
        assert_eq!(rest.size, 192);
        assert_eq!(stack.available(), 0);

        assert!(!stack.allocate(1).is_valid());
        assert!(!stack.allocate_all().is_valid());
    }

    #[test]
    fn deallocate_all_resets_the_cursor() {
        let region = InlineMemory::<256>::new();
        let mut stack = StackAllocator::new(&region);

        let _ = stack.allocate(64);
        let _ = stack.allocate(64);
        // SAFETY: the blocks above are dropped without further use.
        unsafe { stack.deallocate_all() };
        assert_eq!(stack.used(), 0);
        assert_eq!(stack.available(), 256);
    }

    #[test]
    fn ownership_stops_at_the_cursor() {
        let region = InlineMemory::<256>::new();
        let mut stack = StackAllocator::new(&region);

        let mut block = stack.allocate(32);
        assert!(stack.owns(&block));

        // A block forged inside the unconsumed capacity is not owned.
        let unconsumed = MemoryBlock::new((region.as_ptr() as usize + 128) as *mut u8, 16);
        assert!(!stack.owns(&unconsumed));

        // SAFETY: block came from this allocator.
        unsafe { stack.deallocate(&mut block) };
        assert!(!stack.owns(&block));
    }

    #[test]
    fn zero_size_and_oversized_requests_fail() {
        let region = InlineMemory::<64>::new();
        let mut stack = StackAllocator::new(&region);
        assert!(!stack.allocate(0).is_valid());
        assert!(!stack.allocate(65).is_valid());
        assert!(!stack.allocate(usize::MAX).is_valid());
    }

    #[test]
    fn empty_source_serves_nothing() {
        let mut stack = StackAllocator::new(NullMemory::new());
        assert!(!stack.allocate(1).is_valid());
        assert_eq!(stack.capacity(), 0);
    }

    #[test]
    fn owning_allocator_survives_a_move() {
        let mut stack = StackAllocator::new(InlineMemory::<64>::new());
        let _ = stack.allocate(16);

        let mut moved = stack;
        assert_eq!(moved.used(), 16);
        let block = moved.allocate(16);
        assert!(block.is_valid());
        assert!(moved.source().owns_block(&block));
    }
}
