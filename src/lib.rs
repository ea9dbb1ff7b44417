//! Square f32 matrix multiplication, scalar vs. SIMD lanes.
//!
//! I built this to see how much of the gap between a textbook triple loop
//! and a fast kernel comes from two things alone: transposing B so both
//! operands stream contiguously, and feeding those runs through wide
//! fused multiply-add registers. On AVX-512 that is 16 floats per FMA.
//!
//! ## Usage
//!
//! ```
//! use matmul_lanes::multiply;
//!
//! let n = 256;
//! let a = vec![1.0f32; n * n];
//! let b = vec![2.0f32; n * n];
//! let mut c = vec![0.0f32; n * n];
//!
//! multiply(&a, &b, &mut c, n).unwrap();
//! assert!(c.iter().all(|&x| x == 512.0));
//! ```
//!
//! Or run both paths and compare them, as the `matmul-bench` binary does:
//!
//! ```
//! use matmul_lanes::bench::{BenchConfig, run};
//!
//! let report = run(&BenchConfig::new(64).unwrap()).unwrap();
//! assert!(report.passed());
//! ```
//!
//! ## What's inside
//!
//! - i-j-k scalar baseline, any size
//! - plain and cache-blocked transpose
//! - lane kernels: AVX-512 (16), AVX2+FMA (8), NEON (4), portable (16)
//! - 64-byte aligned matrix storage released on drop
//! - benchmark that validates every output cell

pub mod bench;
pub mod error;
pub mod kernels;
pub mod logging;
pub mod matrix;
pub mod strategy;
pub mod transposed;

pub use error::{MatmulError, Result};
pub use kernels::{Backend, LANE_WIDTH};
pub use matrix::Matrix;
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use strategy::Strategy;

/// Matrix multiply: C = A * B
///
/// Transposes B into an aligned scratch buffer and runs the widest lane
/// kernel your CPU has (AVX-512 > AVX2 > NEON > portable). All matrices are
/// n × n, row-major.
///
/// # Errors
///
/// - [`MatmulError::Shape`] if `n` is not a multiple of [`LANE_WIDTH`]
/// - [`MatmulError::Length`] if a slice does not hold `n * n` floats
/// - [`MatmulError::Allocation`] if the scratch buffer cannot be allocated
pub fn multiply(a: &[f32], b: &[f32], c: &mut [f32], n: usize) -> Result<()> {
    transposed::check_shape(n)?;
    error::check_len("A", a.len(), n)?;
    error::check_len("B", b.len(), n)?;
    error::check_len("C", c.len(), n)?;

    let mut bt = Matrix::zeros(n)?;
    matrix::transpose::transpose(b, bt.as_mut_slice(), n);

    transposed::matmul_transposed(a, bt.as_slice(), c, n, Backend::detect())
}

/// Matrix multiply with the scalar i-j-k loop: C = A * B
///
/// Any `n`. `c` is zeroed first, then accumulated into.
///
/// # Errors
///
/// [`MatmulError::Length`] if a slice does not hold `n * n` floats.
pub fn multiply_scalar(a: &[f32], b: &[f32], c: &mut [f32], n: usize) -> Result<()> {
    error::check_len("A", a.len(), n)?;
    error::check_len("B", b.len(), n)?;
    error::check_len("C", c.len(), n)?;

    matrix::init::set_zero(c);
    matmul_naive_ijk(a, b, c, n);
    Ok(())
}
