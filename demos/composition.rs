//! Walkthrough of the toolkit: sources, views, simple allocators, and the
//! composition tree they add up to.
//!
//! Run with `cargo run --example composition`.

use strata_memory::prelude::*;

fn main() {
    // Memory sources: where the bytes come from.
    let inline = InlineMemory::<1024>::new();
    let pool_backing = InlineMemory::<1024>::new();
    let heap = HeapMemory::new(1024);
    let aligned_heap = HeapMemory::with_alignment(1024, 16);

    // All sources share one interface.
    let sources: [&dyn MemorySource; 4] = [&inline, &pool_backing, &heap, &aligned_heap];
    let reserved: usize = sources.iter().map(|source| source.size()).sum();
    println!("reserved {reserved} bytes across {} sources", sources.len());
    assert_eq!(reserved, 4096);

    // Views slice one source into many without copying.
    let (front, back) = MemoryView::of(&inline)
        .split_at(512)
        .expect("split point inside the source");
    println!("split a source into {} + {} bytes", front.size(), back.size());

    // NullAllocator: the safe "nothing available" default.
    let mut null_allocator = NullAllocator;
    assert!(!null_allocator.allocate(10).is_valid());

    // Mallocator: the raw heap as an allocator.
    let mut mallocator = Mallocator;
    let mut heap_block = mallocator.allocate(10);
    assert!(heap_block.is_valid());
    // SAFETY: the block came from the mallocator and is not used again.
    assert!(unsafe { mallocator.deallocate(&mut heap_block) });
    assert!(!heap_block.is_valid());

    // StackAllocator: bump-pointer allocation, LIFO release.
    let mut stack = StackAllocator::new(&heap);
    let mut word = stack.allocate(size_of::<u32>());
    assert!(stack.owns(&word));
    assert!(!null_allocator.owns(&word));
    // SAFETY: the most recent allocation is the top of the stack.
    assert!(unsafe { stack.deallocate(&mut word) });
    println!("stack: {} used / {} capacity", stack.used(), stack.capacity());

    // PoolAllocator: one size class, fixed slot count.
    let mut pool = PoolAllocator::new(&pool_backing, 16);
    println!(
        "pool: {} slots of {} bytes",
        pool.block_count(),
        pool.block_size()
    );
    assert_eq!(pool.block_count(), 64);
    let mut slot = pool.allocate(16);
    assert!(slot.is_valid());
    assert!(!pool.allocate(32).is_valid(), "pools serve exactly one size");

    // Combinators compose policies out of parts. Small requests go to the
    // heap; pool-sized ones to the pool (and nowhere else); mid-sized ones
    // to the stack; anything bigger is forbidden by construction.
    let small_side = SegregatorAllocator::new(
        8,
        Mallocator,
        FallbackAllocator::new(&mut pool, ForbiddenAllocator),
    );
    let large_side = SegregatorAllocator::new(64, &mut stack, ForbiddenAllocator);
    let mut tree = SegregatorAllocator::new(16, small_side, large_side);

    let mut pooled = tree.allocate(16);
    assert!(pooled.is_valid());
    assert!(tree.owns(&pooled));
    // SAFETY: the block came out of this tree; size routing returns it to
    // the branch that produced it.
    assert!(unsafe { tree.deallocate(&mut pooled) });
    assert!(!tree.owns(&pooled));
    drop(tree);

    // CountingAllocator: observe a policy without changing it.
    let counting_region = HeapMemory::new(1024);
    let mut counting = CountingAllocator::new(StackAllocator::new(&counting_region));
    let _a = counting.allocate(8);
    let _b = counting.allocate(16);
    let mut c = counting.allocate(32);
    // SAFETY: the block came from this allocator.
    unsafe { counting.deallocate(&mut c) };
    let stats = counting.stats();
    println!(
        "counting: {} allocs, {} deallocs, {} bytes live (peak {})",
        stats.allocation_count, stats.deallocation_count, stats.used_size, stats.peak_size
    );
    assert_eq!(stats.used_size, 24);
    assert_eq!(stats.peak_size, 56);

    // DoubleBufferedAllocator: per-frame scratch memory.
    let mut frames = DoubleBufferedAllocator::new(512);
    for _ in 0..123 {
        let _this_frame = frames.allocate(8);
        let _also_this_frame = frames.allocate(16);
        // Data allocated above stays readable for one more frame.
        // SAFETY: data from two frames ago is no longer referenced.
        unsafe { frames.swap_buffers() };
    }
    println!("double-buffered: {} bytes per frame", frames.frame_capacity());

    // Hand the pool slot back before teardown.
    // SAFETY: the slot came from this pool.
    assert!(unsafe { pool.deallocate(&mut slot) });
}
