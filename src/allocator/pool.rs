//! Fixed-block-size allocator backed by an intrusive free list.

use core::mem;
use core::ptr;

use super::Allocator;
use crate::block::MemoryBlock;
use crate::source::MemorySource;

/// Sentinel terminating the free list.
const LIST_END: usize = usize::MAX;

/// Fixed-size free-list allocator over a memory source.
///
/// The source is divided into `source.size() / block_size` equally sized
/// slots, all threaded into a singly linked free list at construction.
/// The list lives inside the unused slots themselves: each free slot's
/// first machine word holds the offset of the next free slot. Offsets
/// rather than absolute pointers keep the list valid if the allocator
/// (and an owned source) moves, and survive sources whose base address
/// differs between construction and use.
///
/// The allocator serves exactly one size class: a request for any size
/// other than `block_size` fails immediately, by design.
pub struct PoolAllocator<S: MemorySource> {
    source: S,
    block_size: usize,
    /// Offset of the first free slot, or [`LIST_END`].
    free_head: usize,
    free_count: usize,
}

impl<S: MemorySource> PoolAllocator<S> {
    /// Builds a pool of `block_size`-byte slots over `source`.
    ///
    /// # Panics
    ///
    /// `block_size` must be at least one machine word (free slots store
    /// their list link in that word) and must evenly divide the source
    /// size. Violating either is a construction bug and aborts
    /// immediately.
    pub fn new(source: S, block_size: usize) -> Self {
        assert!(block_size > 0, "pool block size must be non-zero");
        assert!(
            block_size >= mem::size_of::<usize>(),
            "pool block size must have room for a free-list link"
        );
        assert!(
            source.size() % block_size == 0,
            "source size must be a multiple of the pool block size"
        );
        let mut pool = Self {
            source,
            block_size,
            free_head: LIST_END,
            free_count: 0,
        };
        pool.thread_free_list();
        pool
    }

    /// Links every slot of the source into the free list, in address
    /// order, last slot terminating the list.
    fn thread_free_list(&mut self) {
        let count = self.block_count();
        self.free_count = count;
        if count == 0 {
            self.free_head = LIST_END;
            return;
        }
        self.free_head = 0;
        for index in 0..count {
            let offset = index * self.block_size;
            let next = if index + 1 == count {
                LIST_END
            } else {
                offset + self.block_size
            };
            // SAFETY: offset is a slot boundary inside the source, and the
            // slot is free, so its first word is ours to repurpose.
            unsafe { self.write_link(offset, next) };
        }
    }

    /// Size every served block has.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of slots the source is divided into.
    pub fn block_count(&self) -> usize {
        self.source.size() / self.block_size
    }

    /// Number of slots currently on the free list.
    pub fn free_count(&self) -> usize {
        self.free_count
    }

    /// Total capacity, i.e. the source size.
    pub fn capacity(&self) -> usize {
        self.source.size()
    }

    /// The source this pool carves from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Writes the free-list link stored in the slot at `offset`.
    ///
    /// # Safety
    ///
    /// `offset` must be a slot boundary inside the source, and the slot
    /// must be free (its content is not owned by any caller).
    unsafe fn write_link(&mut self, offset: usize, next: usize) {
        let slot = (self.source.as_ptr() as usize + offset) as *mut usize;
        // Unaligned write: slot boundaries need not be word-aligned when
        // the block size is not a multiple of the word size.
        unsafe { ptr::write_unaligned(slot, next) };
    }

    /// Reads the free-list link stored in the slot at `offset`.
    ///
    /// # Safety
    ///
    /// `offset` must be a slot boundary inside the source, and the slot
    /// must be on the free list.
    unsafe fn read_link(&self, offset: usize) -> usize {
        let slot = (self.source.as_ptr() as usize + offset) as *const usize;
        unsafe { ptr::read_unaligned(slot) }
    }
}

impl<S: MemorySource> Allocator for PoolAllocator<S> {
    fn allocate(&mut self, size: usize) -> MemoryBlock {
        if size != self.block_size {
            // Wrong size class; even a smaller request is refused.
            return MemoryBlock::EMPTY;
        }
        if self.free_head == LIST_END {
            #[cfg(feature = "logging")]
            tracing::debug!(
                block_size = self.block_size,
                block_count = self.block_count(),
                "pool exhausted"
            );
            return MemoryBlock::EMPTY;
        }
        let offset = self.free_head;
        // SAFETY: offset came off the free list, so it is a slot boundary
        // holding a link written by this pool.
        self.free_head = unsafe { self.read_link(offset) };
        self.free_count -= 1;
        MemoryBlock::new(
            (self.source.as_ptr() as usize + offset) as *mut u8,
            self.block_size,
        )
    }

    unsafe fn deallocate(&mut self, block: &mut MemoryBlock) -> bool {
        if block.size != self.block_size || !self.source.owns_block(block) {
            return false;
        }
        let offset = block.ptr as usize - self.source.as_ptr() as usize;
        if offset % self.block_size != 0 {
            // An interior pointer is not a slot; refusing it keeps the
            // free list intact.
            return false;
        }
        // SAFETY: the checks above pin block.ptr to a slot boundary inside
        // the source; per the deallocate contract the caller no longer
        // uses the block, so the slot word can hold a link again.
        unsafe { self.write_link(offset, self.free_head) };
        self.free_head = offset;
        self.free_count += 1;
        block.reset();
        true
    }

    fn owns(&self, block: &MemoryBlock) -> bool {
        block.size == self.block_size && self.source.owns_block(block)
    }
}
