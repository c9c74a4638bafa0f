//! Ordered composition of two allocators.

use super::Allocator;
use crate::block::MemoryBlock;

/// Tries a primary allocator and falls back to a secondary on failure.
///
/// The classic "fast, bounded allocator with a general-purpose overflow"
/// policy: requests go to the primary first and spill into the secondary
/// only when the primary reports exhaustion. Deallocation is routed by
/// ownership: blocks the primary owns go back to the primary, everything
/// else goes to the secondary. A secondary whose `owns` is always false
/// (such as [`Mallocator`](crate::allocator::Mallocator)) therefore acts
/// as the catch-all branch.
///
/// Holds no storage of its own; both delegates may themselves be
/// combinators.
pub struct FallbackAllocator<P: Allocator, S: Allocator> {
    primary: P,
    secondary: S,
}

impl<P: Allocator, S: Allocator> FallbackAllocator<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn primary_mut(&mut self) -> &mut P {
        &mut self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }

    pub fn secondary_mut(&mut self) -> &mut S {
        &mut self.secondary
    }
}

impl<P: Allocator, S: Allocator> Allocator for FallbackAllocator<P, S> {
    fn allocate(&mut self, size: usize) -> MemoryBlock {
        let block = self.primary.allocate(size);
        if block.is_valid() {
            block
        } else {
            self.secondary.allocate(size)
        }
    }

    unsafe fn deallocate(&mut self, block: &mut MemoryBlock) -> bool {
        // SAFETY: routed by ownership; per the deallocate contract the
        // block came from one of the two delegates, and a block the
        // primary does not own can only have come from the secondary.
        unsafe {
            if self.primary.owns(block) {
                self.primary.deallocate(block)
            } else {
                self.secondary.deallocate(block)
            }
        }
    }

    fn owns(&self, block: &MemoryBlock) -> bool {
        self.primary.owns(block) || self.secondary.owns(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::{Mallocator, PoolAllocator, StackAllocator};
    use crate::source::InlineMemory;

    #[test]
    fn spills_into_the_secondary_when_the_primary_is_exhausted() {
        let region = InlineMemory::<32>::new();
        let mut fallback = FallbackAllocator::new(PoolAllocator::new(&region, 16), Mallocator);

        let mut first = fallback.allocate(16);
        let mut second = fallback.allocate(16);
        let mut spilled = fallback.allocate(16);

        assert!(first.is_valid() && second.is_valid() && spilled.is_valid());
        assert!(fallback.owns(&first), "primary-owned block");
        assert!(
            !fallback.owns(&spilled),
            "heap secondary never claims ownership"
        );
        assert_eq!(fallback.primary().free_count(), 0);

        // SAFETY: all three blocks came from this composition.
        unsafe {
            assert!(fallback.deallocate(&mut first));
            assert!(fallback.deallocate(&mut second));
            assert!(fallback.deallocate(&mut spilled));
        }
        assert_eq!(fallback.primary().free_count(), 2, "pool blocks went home");
    }

    #[test]
    fn primary_failure_on_size_mismatch_also_spills() {
        let region = InlineMemory::<32>::new();
        let mut fallback = FallbackAllocator::new(PoolAllocator::new(&region, 16), Mallocator);

        // The pool serves one size class; everything else lands on the heap.
        let mut odd = fallback.allocate(24);
        assert!(odd.is_valid());
        assert!(!fallback.owns(&odd));
        // SAFETY: block came from this composition.
        assert!(unsafe { fallback.deallocate(&mut odd) });
    }

    #[test]
    fn composes_with_borrowed_delegates() {
        let region = InlineMemory::<64>::new();
        let mut stack = StackAllocator::new(&region);
        {
            let mut fallback = FallbackAllocator::new(&mut stack, Mallocator);
            let block = fallback.allocate(48);
            assert!(block.is_valid());
            assert!(fallback.owns(&block));
        }
        // The borrowed primary keeps the state the combinator built up.
        assert_eq!(stack.used(), 48);
    }
}
