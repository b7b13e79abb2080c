//! Benchmark workloads for the skep array.
//!
//! Provides deterministic operation sequences so benchmark runs are
//! reproducible across machines and commits:
//!
//! - [`mixed_ops`]: append-heavy mix of pushes, pops, insertions, and
//!   removals from a seeded RNG
//! - [`apply_to_array`] / [`apply_to_vec`]: drive the same sequence
//!   against [`DynArray`] and `std::vec::Vec` for side-by-side numbers

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use skep::DynArray;

/// One mutation in a benchmark workload.
///
/// Positions are carried as raw draws and folded into range at apply
/// time, so the same sequence stays valid whatever length the container
/// happens to have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Append a value at the end.
    Push(u64),
    /// Remove the last value, if any.
    Pop,
    /// Insert a value at `position % (len + 1)`.
    Insert(u64, usize),
    /// Remove the value at `position % len`; skipped while empty.
    Remove(usize),
}

/// Build a deterministic mixed workload of `count` operations.
///
/// The mix is append-heavy (60% push, 10% pop, 15% insert, 15% remove)
/// so the container grows over the run and the shifting operations see
/// realistic lengths. The same seed always yields the same sequence.
pub fn mixed_ops(seed: u64, count: usize) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| match rng.random_range(0..100u32) {
            0..=59 => Op::Push(rng.random()),
            60..=69 => Op::Pop,
            70..=84 => Op::Insert(rng.random(), rng.random::<u32>() as usize),
            _ => Op::Remove(rng.random::<u32>() as usize),
        })
        .collect()
}

/// Apply one operation to a [`DynArray`].
pub fn apply_to_array(array: &mut DynArray<u64>, op: Op) {
    match op {
        Op::Push(value) => array.push(value),
        Op::Pop => {
            array.pop();
        }
        Op::Insert(value, position) => {
            let index = position % (array.len() + 1);
            array.insert(index, value);
        }
        Op::Remove(position) => {
            if !array.is_empty() {
                let index = position % array.len();
                array.remove(index);
            }
        }
    }
}

/// Apply one operation to a `Vec`, mirroring [`apply_to_array`].
pub fn apply_to_vec(vec: &mut Vec<u64>, op: Op) {
    match op {
        Op::Push(value) => vec.push(value),
        Op::Pop => {
            vec.pop();
        }
        Op::Insert(value, position) => {
            let index = position % (vec.len() + 1);
            vec.insert(index, value);
        }
        Op::Remove(position) => {
            if !vec.is_empty() {
                let index = position % vec.len();
                vec.remove(index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_workload() {
        assert_eq!(mixed_ops(42, 500), mixed_ops(42, 500));
        assert_ne!(mixed_ops(42, 500), mixed_ops(43, 500));
    }

    #[test]
    fn workload_has_the_requested_length() {
        assert_eq!(mixed_ops(7, 0).len(), 0);
        assert_eq!(mixed_ops(7, 1234).len(), 1234);
    }

    #[test]
    fn workload_mixes_every_operation() {
        let ops = mixed_ops(5, 2000);
        assert!(ops.iter().any(|op| matches!(op, Op::Push(_))));
        assert!(ops.iter().any(|op| matches!(op, Op::Pop)));
        assert!(ops.iter().any(|op| matches!(op, Op::Insert(..))));
        assert!(ops.iter().any(|op| matches!(op, Op::Remove(_))));
    }

    #[test]
    fn array_and_vec_agree_on_every_workload_step() {
        let mut array = DynArray::new();
        let mut vec = Vec::new();
        for op in mixed_ops(99, 2000) {
            apply_to_array(&mut array, op);
            apply_to_vec(&mut vec, op);
        }
        assert_eq!(array.as_slice(), vec.as_slice());
    }
}
