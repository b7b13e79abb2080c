//! By-value iteration over a consumed array.

#![allow(unsafe_code)]

use std::mem;
use std::ptr;

use crate::raw::RawBuf;

/// Owning iterator over a consumed [`DynArray`](crate::array::DynArray),
/// returned by its `IntoIterator` implementation.
///
/// Yields elements front to back by reading them out of the buffer; the
/// cursor pair tracks the un-consumed range. Dropping the iterator drops
/// whatever it has not yielded, then releases the storage.
pub struct IntoIter<T> {
    /// Held only for its drop glue: frees the allocation when iteration
    /// ends, after the remaining elements have been dropped.
    _buf: RawBuf<T>,
    /// Next element to yield.
    start: *const T,
    /// One past the last live element.
    end: *const T,
}

impl<T> IntoIter<T> {
    /// Takes over a buffer whose first `len` slots are initialized.
    pub(crate) fn new(buf: RawBuf<T>, len: usize) -> Self {
        let start = buf.as_ptr().cast_const();
        // SAFETY: len is at most the capacity, so one past the live prefix
        // is within the buffer's addressable range.
        let end = unsafe { buf.slot(len).cast_const() };
        Self {
            _buf: buf,
            start,
            end,
        }
    }

    /// Count of elements not yet yielded.
    fn remaining(&self) -> usize {
        // T is never zero-sized (RawBuf rejects ZSTs), so plain byte
        // distance divides cleanly.
        (self.end as usize - self.start as usize) / mem::size_of::<T>()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: start < end, so start points at an un-consumed live
        // value; advancing the cursor marks the slot consumed before
        // anything else can observe it.
        unsafe {
            let value = ptr::read(self.start);
            self.start = self.start.add(1);
            Some(value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: [start, end) is exactly the un-consumed live range; each
        // element drops once, then the owned buffer frees the allocation.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.start.cast_mut(),
                self.remaining(),
            ));
        }
    }
}

// SAFETY: the iterator owns its buffer and the un-consumed values outright,
// exactly like the array it was made from; the cursors alias nothing else.
unsafe impl<T: Send> Send for IntoIter<T> {}

// SAFETY: shared access exposes only cursor arithmetic; `T: Sync` covers
// any future shared views of the un-consumed values.
unsafe impl<T: Sync> Sync for IntoIter<T> {}
