//! Thin wrappers over the C heap.
//!
//! These are the only points where the toolkit touches the system
//! allocator. Plain allocation maps straight onto `malloc`/`free`; the
//! aligned path implements its own bookkeeping so that release needs
//! nothing but the pointer.

use core::ffi::c_void;
use core::ptr;

/// Smallest alignment accepted by [`aligned_alloc`].
pub const MIN_ALIGNMENT: usize = 1;

/// Largest alignment accepted by [`aligned_alloc`].
///
/// The bound keeps the rounding adjustment below 256 so it fits in the
/// single bookkeeping byte stored in front of the returned pointer.
pub const MAX_ALIGNMENT: usize = 128;

/// Allocates `size` bytes from the C heap.
///
/// Returns null for a zero-size request or on allocation failure; the
/// alignment of a non-null result is whatever `malloc` guarantees.
pub fn heap_alloc(size: usize) -> *mut u8 {
    if size == 0 {
        return ptr::null_mut();
    }
    // SAFETY: malloc with a non-zero size; a null result is reported to the
    // caller rather than dereferenced.
    unsafe { libc::malloc(size) as *mut u8 }
}

/// Releases memory obtained from [`heap_alloc`]. Null is ignored.
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by [`heap_alloc`] that has not
/// been released yet.
pub unsafe fn heap_free(ptr: *mut u8) {
    if !ptr.is_null() {
        // SAFETY: per the contract above, ptr came from malloc and is
        // released exactly once.
        unsafe { libc::free(ptr as *mut c_void) };
    }
}

/// Allocates `size` bytes aligned to `alignment`.
///
/// The request is padded by `alignment` bytes and the raw address rounded
/// up to the next multiple of `alignment`; the byte immediately preceding
/// the returned pointer records how far the pointer was advanced, so
/// [`aligned_free`] can recover the raw address without any side table.
/// Returns null for a zero-size request or on allocation failure.
///
/// # Panics
///
/// `alignment` must be a power of two within
/// [`MIN_ALIGNMENT`]..=[`MAX_ALIGNMENT`]; anything else is a construction
/// bug and aborts immediately.
pub fn aligned_alloc(size: usize, alignment: usize) -> *mut u8 {
    assert!(
        (MIN_ALIGNMENT..=MAX_ALIGNMENT).contains(&alignment),
        "alignment {alignment} outside supported range {MIN_ALIGNMENT}..={MAX_ALIGNMENT}"
    );
    assert!(
        alignment.is_power_of_two(),
        "alignment {alignment} is not a power of two"
    );

    if size == 0 {
        return ptr::null_mut();
    }
    let Some(request) = size.checked_add(alignment) else {
        return ptr::null_mut();
    };
    let raw = heap_alloc(request);
    if raw.is_null() {
        return ptr::null_mut();
    }

    let raw_addr = raw as usize;
    let misalignment = raw_addr & (alignment - 1);
    // Always advances by at least one byte, leaving room for the
    // bookkeeping byte below the aligned address.
    let adjustment = alignment - misalignment;
    let aligned_addr = raw_addr + adjustment;
    debug_assert!(adjustment < 256);

    let aligned = aligned_addr as *mut u8;
    // SAFETY: aligned_addr - 1 >= raw_addr, and aligned_addr + size <=
    // raw_addr + request, so the write stays inside the allocation.
    unsafe { *aligned.sub(1) = adjustment as u8 };
    aligned
}

/// Releases memory obtained from [`aligned_alloc`]. Null is ignored.
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by [`aligned_alloc`] that has
/// not been released yet.
pub unsafe fn aligned_free(ptr: *mut u8) {
    if ptr.is_null() {
        return;
    }
    // SAFETY: aligned_alloc stored the adjustment in the byte below the
    // pointer; subtracting it recovers the original malloc address.
    unsafe {
        let adjustment = *ptr.sub(1) as usize;
        heap_free((ptr as usize - adjustment) as *mut u8);
    }
}
