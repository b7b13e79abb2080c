//! Fallible-allocation error reporting.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Why an attempt to acquire storage failed.
///
/// Returned by the `try_` variants of the allocating operations. The
/// infallible variants map [`CapacityOverflow`](Self::CapacityOverflow) to a
/// panic and [`AllocFailed`](Self::AllocFailed) to the global allocation
/// error handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TryReserveError {
    /// The requested slot count cannot be laid out in memory: its byte size
    /// would exceed the maximum allocation size.
    CapacityOverflow,
    /// The allocator declined the request.
    AllocFailed {
        /// The layout that was asked for, preserved for diagnostics.
        layout: Layout,
    },
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow => {
                write!(f, "requested capacity exceeds the maximum allocation size")
            }
            Self::AllocFailed { layout } => {
                write!(f, "allocation of {} bytes failed", layout.size())
            }
        }
    }
}

impl Error for TryReserveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        assert_eq!(
            TryReserveError::CapacityOverflow.to_string(),
            "requested capacity exceeds the maximum allocation size"
        );
        let layout = Layout::array::<u64>(12).unwrap();
        assert_eq!(
            TryReserveError::AllocFailed { layout }.to_string(),
            "allocation of 96 bytes failed"
        );
    }

    #[test]
    fn variants_compare_by_content() {
        let layout = Layout::array::<u8>(4).unwrap();
        assert_eq!(
            TryReserveError::AllocFailed { layout },
            TryReserveError::AllocFailed { layout }
        );
        assert_ne!(
            TryReserveError::CapacityOverflow,
            TryReserveError::AllocFailed { layout }
        );
    }
}
