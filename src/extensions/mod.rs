//! Allocators built on top of the core contract.
//!
//! Nothing in here has privileged access: both wrappers are ordinary
//! [`Allocator`](crate::allocator::Allocator) implementations composed out
//! of the public surface, and double as reference points for writing
//! custom ones.

mod counting;
mod double_buffered;

pub use counting::{AllocatorStats, CountingAllocator};
pub use double_buffered::DoubleBufferedAllocator;
