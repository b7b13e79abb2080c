//! A growable, contiguous, random-access sequence built from scratch on
//! raw storage.
//!
//! `skep` provides [`DynArray`], a dynamic array in the `Vec` mold with its
//! machinery split into two strictly layered halves:
//!
//! ```text
//! DynArray<T>      growth policy + element lifecycle (array module)
//! └── RawBuf<T>    exact-capacity raw slots, allocation only (raw module)
//! ```
//!
//! [`RawBuf`] owns memory and knows nothing about values: it allocates
//! exactly the capacity asked of it, hands out stable slot addresses, and
//! frees the block on drop. [`DynArray`] owns the values: it tracks how
//! many leading slots are live, constructs and destroys elements, and
//! decides when and how to move to a bigger buffer. No code outside the
//! array module ever constructs or destroys an element, and no code outside
//! the raw module ever calls the allocator.
//!
//! # Guarantees under failure
//!
//! Element relocation between buffers is a bitwise copy, so it cannot fail
//! and elements never observe it. Operations that might fail, either
//! because the allocator refuses or because an element's `clone` or
//! `default` panics, come in two flavors:
//!
//! - all-or-nothing: growth, [`DynArray::reserve`], [`DynArray::push`],
//!   [`DynArray::insert`], and [`Clone::clone`] build in a fresh buffer
//!   before the old contents are touched, so failure leaves the array
//!   exactly as it was;
//! - stop-where-it-failed: in-place assignment
//!   ([`Clone::clone_from`]) and the fill phase of [`DynArray::resize`]
//!   keep the container sound and leak-free on panic, but the contents may
//!   be a valid intermediate mix.
//!
//! Per-operation docs state which flavor applies.
//!
//! # Example
//!
//! ```
//! use skep::DynArray;
//!
//! let mut values = DynArray::new();
//! for n in 1..=5 {
//!     values.push(n);
//! }
//! values.insert(2, 99);
//! assert_eq!(values.as_slice(), &[1, 2, 99, 3, 4, 5]);
//! assert_eq!(values.remove(0), 1);
//! assert_eq!(values.pop(), Some(5));
//! assert_eq!(values.len(), 4);
//! ```
//!
//! # Departures from `std::vec::Vec`
//!
//! - [`DynArray::reserve`] takes the requested total capacity and
//!   allocates exactly that much, never a rounded-up amount.
//! - [`Clone::clone`] allocates exactly `len` slots, dropping any slack the
//!   source carried.
//! - Zero-sized element types are rejected at construction rather than
//!   special-cased throughout.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod error;
pub mod iter;
pub mod raw;

pub use array::DynArray;
pub use error::TryReserveError;
pub use iter::IntoIter;
pub use raw::RawBuf;
