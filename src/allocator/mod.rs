//! Allocation strategies over memory sources.
//!
//! Terminal allocators ([`NullAllocator`], [`ForbiddenAllocator`],
//! [`Mallocator`]) stand at the leaves of a composition; [`StackAllocator`]
//! and [`PoolAllocator`] carve deterministic budgets out of a
//! [`MemorySource`](crate::source::MemorySource); [`FallbackAllocator`] and
//! [`SegregatorAllocator`] combine any two allocators into one. A
//! composition tree is built once, at construction, and never reshaped.

mod fallback;
mod mallocator;
mod null;
mod pool;
mod segregator;
mod stack;
mod traits;

pub use fallback::FallbackAllocator;
pub use mallocator::Mallocator;
pub use null::{ForbiddenAllocator, NullAllocator};
pub use pool::PoolAllocator;
pub use segregator::SegregatorAllocator;
pub use stack::StackAllocator;
pub use traits::Allocator;
