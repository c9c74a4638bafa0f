//! The allocator capability contract.

use crate::block::MemoryBlock;

/// A policy object that carves blocks out of a memory source (or out of
/// other allocators) and tracks enough state to take them back.
///
/// Failure is communicated entirely through return values: `allocate`
/// returns the empty block, `deallocate` and `owns` return `false`.
/// Running out of a fixed budget is an expected outcome of allocation
/// pressure, not an error condition, so none of these operations panic on
/// exhaustion.
///
/// Allocators take `&mut self`: the framework is single-threaded by
/// design, internal bookkeeping (cursor, free list) is not synchronized,
/// and callers needing concurrency must wrap an instance in their own
/// mutual exclusion. Allocator values are never `Clone` when they carry
/// state; a copied cursor or free list would hand the same memory out
/// twice.
///
/// Combinators hold their delegates either by value or through the
/// blanket `&mut A` / `Box<A>` implementations below, which lets any
/// allocator wrap any other to arbitrary depth.
pub trait Allocator {
    /// Returns a valid block of at least `size` bytes, or the empty block
    /// if the request cannot be served. A zero-size request always fails.
    ///
    /// The returned block records the requested size, not any internal
    /// rounded-up figure.
    fn allocate(&mut self, size: usize) -> MemoryBlock;

    /// Attempts to take `block` back.
    ///
    /// On success the block is reset to the empty state and `true` is
    /// returned; on failure the block is left untouched and the result is
    /// `false`. Empty blocks and blocks this allocator does not own fail
    /// cleanly, without corrupting allocator state.
    ///
    /// # Safety
    ///
    /// `block` must be empty, or must have been produced by this allocator
    /// and not deallocated since. A forged block that happens to pass the
    /// internal checks can corrupt bookkeeping kept inside raw memory or
    /// release storage the allocator never issued. `owns` is the guard a
    /// well-behaved caller uses before routing a block of uncertain
    /// origin.
    unsafe fn deallocate(&mut self, block: &mut MemoryBlock) -> bool;

    /// Whether `block` is currently outstanding from this allocator.
    ///
    /// Pure predicate: never mutates state, and is `false` for the empty
    /// block.
    fn owns(&self, block: &MemoryBlock) -> bool;
}

impl<A: Allocator + ?Sized> Allocator for &mut A {
    fn allocate(&mut self, size: usize) -> MemoryBlock {
        (**self).allocate(size)
    }

    unsafe fn deallocate(&mut self, block: &mut MemoryBlock) -> bool {
        // SAFETY: same contract, forwarded to the underlying allocator.
        unsafe { (**self).deallocate(block) }
    }

    fn owns(&self, block: &MemoryBlock) -> bool {
        (**self).owns(block)
    }
}

impl<A: Allocator + ?Sized> Allocator for Box<A> {
    fn allocate(&mut self, size: usize) -> MemoryBlock {
        (**self).allocate(size)
    }

    unsafe fn deallocate(&mut self, block: &mut MemoryBlock) -> bool {
        // SAFETY: same contract, forwarded to the underlying allocator.
        unsafe { (**self).deallocate(block) }
    }

    fn owns(&self, block: &MemoryBlock) -> bool {
        (**self).owns(block)
    }
}
