//! Test fixtures for skep development.
//!
//! Provides instrumented element types for exercising the container:
//! [`Tracked`] counts destructor runs, [`FailingClone`] panics once a
//! clone budget is exhausted, and [`NoClone`] is move-only. All fixtures
//! are safe code; the crate under test supplies the unsafety.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared drop tally handed to instrumented elements.
///
/// Cloning the counter clones the handle, not the count; every element
/// built from the same counter bumps the same tally.
#[derive(Clone, Debug, Default)]
pub struct DropCounter {
    drops: Arc<AtomicUsize>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destructor runs recorded so far.
    pub fn count(&self) -> usize {
        self.drops.load(Ordering::Relaxed)
    }

    fn bump(&self) {
        self.drops.fetch_add(1, Ordering::Relaxed);
    }
}

/// Shared allowance of successful clones.
///
/// Each successful clone of a [`FailingClone`] consumes one unit; the
/// clone that finds the budget empty panics. A budget of zero makes the
/// very first clone fail, which is how tests prove an operation never
/// clones at all.
#[derive(Clone, Debug)]
pub struct CloneBudget {
    remaining: Arc<AtomicUsize>,
}

impl CloneBudget {
    pub fn new(allowed_clones: usize) -> Self {
        Self {
            remaining: Arc::new(AtomicUsize::new(allowed_clones)),
        }
    }

    /// Clones still allowed before the next one panics.
    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Relaxed)
    }

    /// Consumes one unit; `false` means the budget was already empty.
    fn consume(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Element that records every destructor run in a [`DropCounter`].
///
/// Clones report to the same counter as the original, so a test's final
/// tally covers every instance that ever existed.
#[derive(Debug)]
pub struct Tracked {
    pub value: u64,
    drops: DropCounter,
}

impl Tracked {
    pub fn new(value: u64, drops: &DropCounter) -> Self {
        Self {
            value,
            drops: drops.clone(),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            drops: self.drops.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.bump();
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Element whose `clone` panics once its [`CloneBudget`] runs out.
///
/// Construction via [`new`](FailingClone::new) never consumes budget;
/// only `Clone::clone` does. Destructor runs are tallied like
/// [`Tracked`]'s, so unwind paths can be audited for leaks and
/// double-drops.
#[derive(Debug)]
pub struct FailingClone {
    pub value: u64,
    budget: CloneBudget,
    drops: DropCounter,
}

impl FailingClone {
    pub fn new(value: u64, budget: &CloneBudget, drops: &DropCounter) -> Self {
        Self {
            value,
            budget: budget.clone(),
            drops: drops.clone(),
        }
    }
}

impl Clone for FailingClone {
    fn clone(&self) -> Self {
        assert!(
            self.budget.consume(),
            "clone budget exhausted: deliberate test panic"
        );
        Self {
            value: self.value,
            budget: self.budget.clone(),
            drops: self.drops.clone(),
        }
    }
}

impl Drop for FailingClone {
    fn drop(&mut self) {
        self.drops.bump();
    }
}

impl PartialEq for FailingClone {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Move-only element for proving that container operations work without
/// `Clone` or `Copy` bounds.
#[derive(Debug, PartialEq, Eq)]
pub struct NoClone(pub u32);
