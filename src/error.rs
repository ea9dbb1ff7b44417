//! Error types shared by the kernels, the matrix storage and the benchmark.

use thiserror::Error;

use crate::kernels::Backend;

/// Everything that can stop a multiplication before it produces a result.
///
/// A tolerance mismatch is deliberately absent: it is reported as a
/// [`Verdict`](crate::bench::Verdict), not raised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatmulError {
    #[error("matrix size {size} is not a positive multiple of the lane width {lanes}")]
    Shape { size: usize, lanes: usize },

    #[error("failed to allocate {bytes} bytes aligned to {align}")]
    Allocation { bytes: usize, align: usize },

    #[error("{name}: expected {expected} elements, got {actual}")]
    Length {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{0} lanes are not supported on this CPU")]
    Backend(Backend),
}

pub type Result<T> = std::result::Result<T, MatmulError>;

/// Checks that a borrowed operand holds exactly `n * n` floats.
///
/// An `n` whose square overflows `usize` can never match a real slice and is
/// reported as a length error with `expected: usize::MAX`.
pub(crate) fn check_len(name: &'static str, len: usize, n: usize) -> Result<()> {
    let Some(expected) = n.checked_mul(n) else {
        return Err(MatmulError::Length {
            name,
            expected: usize::MAX,
            actual: len,
        });
    };
    if len != expected {
        return Err(MatmulError::Length {
            name,
            expected,
            actual: len,
        });
    }
    Ok(())
}
