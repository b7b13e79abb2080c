//! Untyped slot storage: allocation without element lifecycle.
//!
//! [`RawBuf`] owns a contiguous allocation of `capacity` element slots and
//! nothing else. It never constructs, clones, drops, or reads a `T`; every
//! slot it hands out is raw memory, and the caller is responsible for
//! tracking which slots currently hold live values. The growth engine in
//! [`crate::array`] is the only intended caller, but the contract stands on
//! its own:
//!
//! - `capacity` is exactly what was requested, never rounded up.
//! - Slot addresses are stable for the lifetime of the buffer.
//! - Dropping the buffer frees the allocation and does nothing to any
//!   values the caller may have left in the slots. Leaking those values is
//!   the caller's bug, not this type's.
//!
//! Zero-sized element types are rejected at construction. Supporting them
//! would turn every pointer offset into a no-op and force the layer above
//! to special-case all of its arithmetic; the cost outweighs the use.

#![allow(unsafe_code)]

use std::alloc::{self, handle_alloc_error, Layout};
use std::mem;
use std::ptr::NonNull;

use crate::error::TryReserveError;

/// An owned, fixed-capacity allocation of uninitialized `T` slots.
///
/// The zero-capacity state holds a dangling (aligned, non-null) pointer and
/// owns no allocation, so empty buffers are free to create and drop.
pub struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
}

impl<T> RawBuf<T> {
    /// Creates a buffer with zero capacity and no allocation.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized.
    pub const fn new() -> Self {
        assert!(
            mem::size_of::<T>() != 0,
            "zero-sized element types are not supported"
        );
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
        }
    }

    /// Allocates a buffer with exactly `cap` slots.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized or if the byte size of `cap` slots
    /// overflows the maximum allocation size. Aborts via
    /// [`handle_alloc_error`] if the allocator refuses the request.
    pub fn with_capacity(cap: usize) -> Self {
        match Self::try_with_capacity(cap) {
            Ok(buf) => buf,
            Err(TryReserveError::CapacityOverflow) => {
                panic!("capacity overflow: cannot lay out {cap} elements")
            }
            Err(TryReserveError::AllocFailed { layout }) => handle_alloc_error(layout),
        }
    }

    /// Allocates a buffer with exactly `cap` slots, reporting failure
    /// instead of panicking or aborting.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized. That is a misuse of the type, not a
    /// runtime condition worth recovering from.
    pub fn try_with_capacity(cap: usize) -> Result<Self, TryReserveError> {
        if cap == 0 {
            return Ok(Self::new());
        }
        assert!(
            mem::size_of::<T>() != 0,
            "zero-sized element types are not supported"
        );
        // Layout::array enforces the isize::MAX byte-size ceiling as well as
        // the usize multiplication, so one check covers both overflow modes.
        let layout = Layout::array::<T>(cap).map_err(|_| TryReserveError::CapacityOverflow)?;
        // SAFETY: cap > 0 and T is not zero-sized, so the layout has
        // non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => Ok(Self { ptr, cap }),
            None => Err(TryReserveError::AllocFailed { layout }),
        }
    }

    /// Number of slots in the buffer.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Base address of slot 0.
    ///
    /// Aligned and non-null even at zero capacity, which makes it directly
    /// usable for empty-slice construction.
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Address of the slot at `offset`.
    ///
    /// Offsets run over the inclusive range `0..=capacity`: the
    /// one-past-the-end address is a valid position for arithmetic and
    /// comparison, and for zero-length bulk copies, but must never be read
    /// from or written through.
    ///
    /// # Safety
    ///
    /// `offset` must be at most [`capacity`](Self::capacity). Whether the
    /// returned pointer may be dereferenced is the caller's affair; the
    /// buffer does not know which slots hold live values.
    pub unsafe fn slot(&self, offset: usize) -> *mut T {
        debug_assert!(
            offset <= self.cap,
            "slot offset {offset} out of range for capacity {}",
            self.cap
        );
        // SAFETY: offset <= cap keeps the result within the allocation or at
        // its one-past-the-end address, which `add` permits.
        unsafe { self.ptr.as_ptr().add(offset) }
    }

    /// Exchanges the allocations of two buffers without touching any slot.
    ///
    /// Runs in O(1) and cannot fail. This is the primitive the growth engine
    /// uses to adopt a freshly filled buffer and retire the old one.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.cap, &mut other.cap);
    }
}

impl<T> Default for RawBuf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.cap != 0 {
            let layout = Layout::array::<T>(self.cap)
                .expect("layout was validated when the buffer was allocated");
            // SAFETY: cap != 0 rules out the dangling no-allocation state,
            // so ptr came from the global allocator with exactly this
            // layout, and ownership guarantees it is freed once.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

// SAFETY: the buffer owns its allocation outright, so sending it transfers
// that ownership wholesale. `T: Send` keeps any live values a caller has
// placed in the slots sendable along with it.
unsafe impl<T: Send> Send for RawBuf<T> {}

// SAFETY: a shared buffer only exposes its base address and capacity.
// `T: Sync` covers callers that hand out `&T` into slots they know are live.
unsafe impl<T: Sync> Sync for RawBuf<T> {}
