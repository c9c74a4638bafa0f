//! Property tests for the rounding and allocator invariants.

use proptest::prelude::*;
use strata_memory::prelude::*;
use strata_memory::utils::align_up;

proptest! {
    /// Rounding is idempotent, never shrinks, and lands on a multiple of
    /// the alignment.
    #[test]
    fn align_up_is_a_rounding(size in 0usize..(1 << 40), pow in 0u32..8) {
        let alignment = 1usize << pow;
        let rounded = align_up(size, alignment);
        prop_assert!(rounded >= size);
        prop_assert_eq!(rounded % alignment, 0);
        prop_assert_eq!(align_up(rounded, alignment), rounded);
        prop_assert!(rounded - size < alignment);
    }

    /// Any allocation sequence that fits can be released in reverse order,
    /// leaving the stack empty, with the accounting identity holding at
    /// every step.
    #[test]
    fn stack_releases_in_reverse_order(sizes in prop::collection::vec(1usize..64, 1..16)) {
        let region = HeapMemory::new(4096);
        let mut stack = StackAllocator::new(&region);

        let mut blocks: Vec<MemoryBlock> = Vec::new();
        for &size in &sizes {
            let block = stack.allocate(size);
            prop_assert!(block.is_valid());
            prop_assert_eq!(stack.used() + stack.available(), stack.capacity());
            blocks.push(block);
        }
        for block in blocks.iter_mut().rev() {
            // SAFETY: released in reverse allocation order, so each block
            // is on top of the stack when it is handed back.
            let released = unsafe { stack.deallocate(block) };
            prop_assert!(released);
            prop_assert!(!block.is_valid());
        }
        prop_assert_eq!(stack.used(), 0);
    }

    /// The pool free count mirrors the number of live blocks exactly, and
    /// allocation fails precisely when no slot is free.
    #[test]
    fn pool_conserves_its_slots(ops in prop::collection::vec(any::<bool>(), 0..64)) {
        let region = HeapMemory::new(512);
        let mut pool = PoolAllocator::new(&region, 16);
        let slots = pool.block_count();

        let mut live: Vec<MemoryBlock> = Vec::new();
        for take in ops {
            if take {
                let block = pool.allocate(16);
                prop_assert_eq!(block.is_valid(), live.len() < slots);
                if block.is_valid() {
                    live.push(block);
                }
            } else if let Some(mut block) = live.pop() {
                // SAFETY: the block came from this pool and is not used
                // after release.
                let released = unsafe { pool.deallocate(&mut block) };
                prop_assert!(released);
            }
            prop_assert_eq!(pool.free_count(), slots - live.len());
        }
    }

    /// Segregator routing is consistent between allocation and release
    /// for any threshold and request size.
    #[test]
    fn segregator_routing_is_consistent(threshold in 1usize..256, size in 1usize..256) {
        let mut allocator = SegregatorAllocator::new(
            threshold,
            CountingAllocator::new(Mallocator),
            CountingAllocator::new(Mallocator),
        );
        let mut block = allocator.allocate(size);
        prop_assert!(block.is_valid());
        // SAFETY: the block came from this composition.
        let released = unsafe { allocator.deallocate(&mut block) };
        prop_assert!(released);

        let through_smaller = usize::from(size <= threshold);
        prop_assert_eq!(allocator.smaller().stats().allocation_count, through_smaller);
        prop_assert_eq!(allocator.smaller().stats().deallocation_count, through_smaller);
        prop_assert_eq!(allocator.larger().stats().allocation_count, 1 - through_smaller);
        prop_assert_eq!(allocator.larger().stats().deallocation_count, 1 - through_smaller);
    }
}
