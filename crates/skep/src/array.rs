//! The growth and mutation engine: [`DynArray`].
//!
//! A [`DynArray`] is a [`RawBuf`] plus one number: `len`, the count of live
//! elements. The container invariant is that slots `0..len` hold
//! initialized values and slots `len..capacity` are raw spare storage.
//! Every operation in this module is a careful dance around that line.
//!
//! # Failure discipline
//!
//! Mutations can fail in two ways: the allocator refuses a new buffer, or
//! user code (`clone`, `Default::default`) panics while producing an
//! element. The rules the engine follows:
//!
//! - Relocation between buffers is always a bitwise copy. Moving a value is
//!   not user code and cannot fail, so any operation that builds its result
//!   in a fresh buffer before touching the old one leaves the container
//!   untouched on failure. Allocation, growth, insertion with growth, and
//!   [`clone`](Clone::clone) all work this way.
//! - Operations that write into the live prefix in place
//!   ([`clone_from`](Clone::clone_from), mid-fill [`resize`](DynArray::resize))
//!   stop at the point of panic. The container stays sound and every element
//!   is dropped exactly once, but the contents are a valid mix of old and
//!   new. Callers who need all-or-nothing take the fresh-buffer route.
//! - `len` only moves when the slot it crosses is in the matching state:
//!   incremented after a value lands, decremented before a value is read
//!   out or dropped. A panic at any instant therefore leaves `len`
//!   describing exactly the live slots, and the container's own drop glue
//!   is the rollback.

#![allow(unsafe_code)]

use std::fmt;
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::error::TryReserveError;
use crate::iter::IntoIter;
use crate::raw::RawBuf;

/// A growable, contiguous, random-access sequence of `T`.
///
/// Elements live in one allocation and are addressable by index in O(1).
/// Appending is amortized O(1) under a doubling growth policy; insertion
/// and removal at arbitrary positions shift the tail and cost O(len).
///
/// Slices of the live elements are available through [`Deref`], so the full
/// `&[T]` / `&mut [T]` API (indexing, iteration, `sort`, `binary_search`,
/// and the rest) applies directly. Whole containers exchange storage with
/// [`std::mem::swap`] in O(1) without touching any element.
///
/// `T` must not be zero-sized; construction panics otherwise.
pub struct DynArray<T> {
    buf: RawBuf<T>,
    len: usize,
    /// Marks ownership of the `T` values in the first `len` slots.
    _marker: PhantomData<T>,
}

impl<T> DynArray<T> {
    /// Creates an empty array without allocating.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized.
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates an empty array with exactly `capacity` slots preallocated.
    ///
    /// Growth is not triggered until the `capacity + 1`-th element, so a
    /// caller who knows the final size up front pays for one allocation and
    /// zero relocations.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized or the capacity overflows the maximum
    /// allocation size; aborts if the allocator refuses.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuf::with_capacity(capacity),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates an array of `len` default-constructed elements.
    ///
    /// If a `default()` call panics partway, the elements built so far are
    /// dropped and the allocation is released.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`with_capacity`](Self::with_capacity).
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut array = Self::with_capacity(len);
        for _ in 0..len {
            let value = T::default();
            // SAFETY: exactly len slots were allocated and array.len < len
            // here, so the target slot is spare capacity.
            unsafe { ptr::write(array.buf.slot(array.len), value) };
            array.len += 1;
        }
        array
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots the array can fill before reallocating.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The live elements as a shared slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots 0..len are initialized by the container invariant,
        // and the base pointer is aligned and non-null even at capacity 0.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for `as_slice`; the &mut receiver gives exclusivity.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Raw pointer to slot 0, valid for reads of the first `len` elements.
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Raw pointer to slot 0, valid for access to the first `len` elements.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_ptr()
    }

    /// Grows the buffer to exactly `new_capacity` slots.
    ///
    /// Unlike the standard library's `Vec::reserve`, the argument is the
    /// requested total capacity, not a count of additional slots, and the
    /// resulting capacity is exactly what was asked for. A request at or
    /// below the current capacity does nothing; this operation never
    /// shrinks and never rounds up.
    ///
    /// On success the elements have been bitwise-relocated to the new
    /// buffer; on allocation failure the array is untouched.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows the maximum allocation size; aborts
    /// if the allocator refuses.
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity() {
            return;
        }
        self.relocate_to(RawBuf::with_capacity(new_capacity));
    }

    /// Fallible [`reserve`](Self::reserve): reports allocation failure
    /// instead of panicking or aborting, leaving the array untouched.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        self.relocate_to(RawBuf::try_with_capacity(new_capacity)?);
        Ok(())
    }

    /// Drops the allocation down to exactly `len` slots.
    ///
    /// An empty array releases its allocation entirely. A full one does
    /// nothing.
    pub fn shrink_to_fit(&mut self) {
        if self.len == self.capacity() {
            return;
        }
        self.relocate_to(RawBuf::with_capacity(self.len));
    }

    /// Appends `value` at the end, growing if the buffer is full.
    ///
    /// Growth doubles the capacity (from zero: one slot), so a long run of
    /// appends performs O(log n) relocations. On allocation failure the
    /// array is untouched and `value`'s construction is the caller's only
    /// loss.
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            self.relocate_to(RawBuf::with_capacity(self.grown_capacity()));
        }
        // SAFETY: after the growth check there is at least one spare slot
        // past the live prefix.
        unsafe { ptr::write(self.buf.slot(self.len), value) };
        // len moves only once the slot holds the value.
        self.len += 1;
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the decremented len held the last live value;
        // reading it out returns the slot to spare capacity.
        Some(unsafe { ptr::read(self.buf.slot(self.len)) })
    }

    /// Inserts `value` at `index`, shifting `[index, len)` one slot right.
    ///
    /// With spare capacity the shift is an in-place bitwise copy and cannot
    /// fail. At full capacity the element is written into its final slot of
    /// a fresh buffer first and the neighbors are relocated around it, so
    /// allocation failure leaves the array untouched.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(
            index <= self.len,
            "insertion index {index} out of range for length {}",
            self.len
        );
        if self.len == self.capacity() {
            self.insert_with_growth(index, value);
        } else {
            self.insert_in_place(index, value);
        }
    }

    /// Removes and returns the element at `index`, shifting
    /// `(index, len)` one slot left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "removal index {index} out of range for length {}",
            self.len
        );
        // SAFETY: index < len, so the slot is live. After the value is read
        // out, the bitwise shift re-covers the hole and the len decrement
        // re-establishes the invariant.
        let value = unsafe {
            let base = self.buf.slot(index);
            let value = ptr::read(base);
            ptr::copy(base.add(1), base, self.len - index - 1);
            value
        };
        self.len -= 1;
        value
    }

    /// Shortens the array to `new_len` elements, dropping the tail in
    /// front-to-back order. Does nothing if `new_len >= len`.
    ///
    /// Capacity is unchanged; use [`shrink_to_fit`](Self::shrink_to_fit) to
    /// release storage.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail_len = self.len - new_len;
        // len shrinks before the drops run, so a panicking destructor
        // cannot lead the container to drop the tail twice.
        self.len = new_len;
        // SAFETY: the tail slots held live values and are now outside the
        // live prefix; drop_in_place runs each destructor exactly once.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.slot(new_len), tail_len);
            ptr::drop_in_place(tail);
        }
    }

    /// Drops every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes to exactly `new_len` elements.
    ///
    /// Shrinking truncates. Growing reserves exactly `new_len` slots, then
    /// appends default-constructed elements one at a time; if a `default()`
    /// call panics, the elements appended so far remain live and the array
    /// stays valid at an intermediate length.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len);
        while self.len < new_len {
            let value = T::default();
            // SAFETY: len < new_len <= capacity after the reserve, so the
            // target slot is spare capacity.
            unsafe { ptr::write(self.buf.slot(self.len), value) };
            self.len += 1;
        }
    }

    /// Moves the contents out, leaving an empty array with no allocation.
    ///
    /// The drained-but-reusable state is the same one a fresh
    /// [`new`](Self::new) produces, so the receiver can keep appending.
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    /// Borrowing iterator over the live elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Mutably borrowing iterator over the live elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Capacity after one growth step: doubling, with one slot from empty.
    fn grown_capacity(&self) -> usize {
        let cap = self.capacity();
        // cap is at most isize::MAX / size_of::<T>() once allocated, so the
        // doubling cannot overflow usize; Layout::array still checks the
        // byte-size ceiling on the new value.
        if cap == 0 {
            1
        } else {
            cap * 2
        }
    }

    /// Bitwise-relocates the live prefix into `new_buf` and adopts it.
    ///
    /// Elements never observe relocation, and a copy of raw bytes cannot
    /// fail, so every caller that allocates first gets all-or-nothing
    /// behavior for free. The displaced buffer leaves through `new_buf`'s
    /// drop with no live slots in it.
    fn relocate_to(&mut self, mut new_buf: RawBuf<T>) {
        debug_assert!(self.len <= new_buf.capacity());
        // SAFETY: the source holds len initialized slots, the destination
        // has at least len spare slots, and distinct allocations cannot
        // overlap.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), new_buf.as_ptr(), self.len);
        }
        self.buf.swap(&mut new_buf);
    }

    /// Insertion into spare capacity: shift right, then fill the hole.
    fn insert_in_place(&mut self, index: usize, value: T) {
        // SAFETY: index <= len < capacity. The shift writes to
        // [index + 1, len + 1), still within capacity; the hole at index is
        // logically uninitialized for the instant before the write refills
        // it, and no code that could observe it runs in between.
        unsafe {
            let base = self.buf.slot(index);
            ptr::copy(base, base.add(1), self.len - index);
            ptr::write(base, value);
        }
        self.len += 1;
    }

    /// Insertion that reallocates: the new element is written into its
    /// final slot of the fresh buffer first, then the prefix and the
    /// shifted suffix are relocated around it, and only then does the array
    /// adopt the buffer. Failure before adoption leaves the array intact.
    fn insert_with_growth(&mut self, index: usize, value: T) {
        let mut new_buf = RawBuf::with_capacity(self.grown_capacity());
        // SAFETY: the grown buffer has at least len + 1 slots and
        // index <= len, so the value's slot, the prefix [0, index), and the
        // suffix landing at [index + 1, len + 1) are all in range and
        // mutually disjoint; the bulk copies run between distinct
        // allocations.
        unsafe {
            ptr::write(new_buf.slot(index), value);
            ptr::copy_nonoverlapping(self.buf.as_ptr(), new_buf.as_ptr(), index);
            ptr::copy_nonoverlapping(
                self.buf.slot(index),
                new_buf.slot(index + 1),
                self.len - index,
            );
        }
        self.buf.swap(&mut new_buf);
        self.len += 1;
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// Deep copy with exactly `len` slots of capacity.
    ///
    /// Elements are cloned front to back into a fresh buffer. If a clone
    /// panics, the partial copy drops its elements and its allocation;
    /// the source is never touched.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);
        for value in self.as_slice() {
            // Cannot reallocate: the loop appends exactly the preallocated
            // count. A panicking clone unwinds through `copy`'s drop glue.
            copy.push(value.clone());
        }
        copy
    }

    /// Storage-reusing copy assignment.
    ///
    /// If the current capacity holds `source`, elements are assigned in
    /// place: the shared prefix via `clone_from` on each element, then
    /// either the excess tail is dropped or the missing tail is cloned on.
    /// Otherwise this falls back to a full [`clone`](Clone::clone), and the
    /// old contents are dropped only after the replacement is fully built.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            *self = source.clone();
            return;
        }
        let shared = self.len.min(source.len);
        self.as_mut_slice()[..shared].clone_from_slice(&source.as_slice()[..shared]);
        if source.len < self.len {
            self.truncate(source.len);
        } else {
            for value in &source.as_slice()[shared..] {
                // Cannot reallocate: source.len fits the current capacity.
                self.push(value.clone());
            }
        }
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        // SAFETY: slots 0..len hold the live elements; each is dropped
        // exactly once, then the buffer frees itself.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.as_ptr(), self.len));
        }
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    /// Element-wise equality; capacity does not participate.
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the array into an iterator that yields the elements by
    /// value, front to back. Dropping the iterator drops the elements it
    /// has not yielded, then the storage.
    fn into_iter(self) -> IntoIter<T> {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never used again and its drop glue is
        // suppressed, so buffer ownership (live prefix included) transfers
        // wholesale to the iterator.
        let buf = unsafe { ptr::read(&this.buf) };
        IntoIter::new(buf, this.len)
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}
