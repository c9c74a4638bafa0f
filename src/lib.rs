//! # strata-memory
//!
//! Composable memory sources and allocation strategies for deterministic,
//! inspectable memory behavior.
//!
//! The crate separates *where memory comes from* from *how it is carved
//! up*. A [`MemorySource`](source::MemorySource) is a fixed, contiguous
//! region acquired once ([`HeapMemory`](source::HeapMemory),
//! [`InlineMemory`](source::InlineMemory), a
//! [`MemoryView`](source::MemoryView) slicing either). An
//! [`Allocator`](allocator::Allocator) is a policy that hands out
//! [`MemoryBlock`]s from a source, either bump-pointer
//! ([`StackAllocator`](allocator::StackAllocator)), fixed-size free list
//! ([`PoolAllocator`](allocator::PoolAllocator)), or from two other
//! allocators ([`FallbackAllocator`](allocator::FallbackAllocator),
//! [`SegregatorAllocator`](allocator::SegregatorAllocator)), so simple
//! strategies compose into application-specific allocation schemes without
//! touching the global heap.
//!
//! ## Quick start
//!
//! ```
//! use strata_memory::prelude::*;
//!
//! // Reserve one region up front, then carve it deterministically.
//! let region = HeapMemory::new(1024);
//! let mut stack = StackAllocator::new(&region);
//!
//! let mut block = stack.allocate(128);
//! assert!(block.is_valid());
//! assert!(stack.owns(&block));
//!
//! // Blocks are returned explicitly, most recent first; a successful
//! // deallocation consumes the block value.
//! assert!(unsafe { stack.deallocate(&mut block) });
//! assert!(!block.is_valid());
//! ```
//!
//! Composition builds policy out of parts:
//!
//! ```
//! use strata_memory::prelude::*;
//!
//! let region = HeapMemory::new(4096);
//! // Small requests hit the bounded stack; anything it cannot serve
//! // (too large, or exhausted) spills to the heap.
//! let mut allocator = FallbackAllocator::new(StackAllocator::new(&region), Mallocator);
//! let mut block = allocator.allocate(64);
//! assert!(block.is_valid());
//! assert!(unsafe { allocator.deallocate(&mut block) });
//! ```
//!
//! ## Design
//!
//! - **Failure is a value.** `allocate` returns the empty block and
//!   `deallocate` returns `false`; exhaustion is an expected outcome, not
//!   an error. Malformed construction parameters, by contrast, are bugs
//!   and fail fast with a panic.
//! - **Manual reclamation.** Blocks carry no destructor and no lifetime;
//!   the caller returns each block to the allocator that issued it.
//!   `owns` exists so routing code can check before it leaps.
//! - **Single-threaded.** Operations take `&mut self` and nothing is
//!   synchronized; callers needing concurrency wrap an allocator in their
//!   own lock.
//!
//! ## Features
//!
//! - `logging` (default): `tracing` events on allocation-failure paths.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(clippy::all)]
#![warn(rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]
// Address/pointer round-trips are the substance of this crate; each site
// is reviewed where it appears.
#![allow(clippy::cast_ptr_alignment)]

pub mod allocator;
pub mod block;
pub mod error;
pub mod extensions;
pub mod raw;
pub mod source;
pub mod utils;

pub use crate::block::MemoryBlock;
pub use crate::error::{MemoryError, MemoryResult};

pub mod prelude {
    //! Convenient re-exports of the commonly used types and traits.

    pub use crate::allocator::{
        Allocator, FallbackAllocator, ForbiddenAllocator, Mallocator, NullAllocator,
        PoolAllocator, SegregatorAllocator, StackAllocator,
    };
    pub use crate::block::MemoryBlock;
    pub use crate::error::{MemoryError, MemoryResult};
    pub use crate::extensions::{AllocatorStats, CountingAllocator, DoubleBufferedAllocator};
    pub use crate::source::{HeapMemory, InlineMemory, MemorySource, MemoryView, NullMemory};
}
