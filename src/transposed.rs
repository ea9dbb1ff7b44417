//! Lane-parallel matmul over a pre-transposed right operand.
//!
//! With B stored as B^T, column j of B is row j of B^T, so every output cell
//! C[i, j] is a dot product of two contiguous rows: row i of A and row j of
//! B^T. Both can be streamed with plain vector loads, no gathers.

use crate::error::{MatmulError, Result, check_len};
use crate::kernels::{Backend, LANE_WIDTH, Lanes};

/// Fails with [`MatmulError::Shape`] unless `n` is a positive multiple of
/// [`LANE_WIDTH`].
pub fn check_shape(n: usize) -> Result<()> {
    if n == 0 || n % LANE_WIDTH != 0 {
        return Err(MatmulError::Shape {
            size: n,
            lanes: LANE_WIDTH,
        });
    }
    Ok(())
}

/// C = A * B, given A and B^T.
///
/// Every cell of `c` is overwritten once; its previous contents are
/// ignored. Nothing is read or written unless all checks pass.
///
/// # Arguments
///
/// * `a` - Matrix A (n × n), row-major
/// * `bt` - Transposed matrix B^T (n × n), row-major
/// * `c` - Matrix C (n × n), row-major, written (C = A * B)
/// * `n` - Matrix dimension, a multiple of [`LANE_WIDTH`]
/// * `backend` - Vector width to run on
///
/// # Errors
///
/// - [`MatmulError::Shape`] if `n` is not a multiple of [`LANE_WIDTH`]
/// - [`MatmulError::Length`] if a slice does not hold `n * n` floats
/// - [`MatmulError::Backend`] if this CPU lacks `backend`
pub fn matmul_transposed(
    a: &[f32],
    bt: &[f32],
    c: &mut [f32],
    n: usize,
    backend: Backend,
) -> Result<()> {
    check_shape(n)?;
    check_len("A", a.len(), n)?;
    check_len("B^T", bt.len(), n)?;
    check_len("C", c.len(), n)?;

    if !backend.is_supported() {
        return Err(MatmulError::Backend(backend));
    }

    // SAFETY: backend support and shape were checked above.
    unsafe {
        match backend {
            #[cfg(target_arch = "x86_64")]
            Backend::Avx512 => matmul_lanes::<crate::kernels::avx512::F32x16>(a, bt, c, n),
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => matmul_lanes::<crate::kernels::avx2::F32x8>(a, bt, c, n),
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => matmul_lanes::<crate::kernels::neon::F32x4>(a, bt, c, n),
            Backend::Portable => matmul_lanes::<crate::kernels::portable::Portable>(a, bt, c, n),
            #[allow(unreachable_patterns)]
            _ => return Err(MatmulError::Backend(backend)),
        }
    }

    Ok(())
}

/// The cell loop, shared by every lane width.
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports `L` (see [`Backend::is_supported`])
/// - `n` is a multiple of `L::WIDTH`
/// - all slices hold `n * n` floats
pub unsafe fn matmul_lanes<L: Lanes>(a: &[f32], bt: &[f32], c: &mut [f32], n: usize) {
    debug_assert_eq!(n % L::WIDTH, 0);

    for (i, c_row) in c.chunks_exact_mut(n).enumerate() {
        let a_row = &a[i * n..(i + 1) * n];

        for (j, cell) in c_row.iter_mut().enumerate() {
            let bt_row = &bt[j * n..(j + 1) * n];
            *cell = unsafe { L::dot(a_row, bt_row) };
        }
    }
}
