//! The two ways of computing C = A * B, behind one `multiply`.

use std::fmt;

use tracing::debug;

use crate::error::{MatmulError, Result};
use crate::kernels::Backend;
use crate::matrix::{Matrix, init, naive_ijk, transpose};
use crate::transposed::{check_shape, matmul_transposed};

/// How to compute a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// i-j-k triple loop, any size. The oracle.
    Scalar,
    /// Transpose B, then one lane dot product per cell. Size must be a
    /// multiple of [`LANE_WIDTH`](crate::kernels::LANE_WIDTH).
    Lanes(Backend),
}

impl Strategy {
    /// Lane strategy on the widest backend this CPU has.
    pub fn fastest() -> Self {
        Strategy::Lanes(Backend::detect())
    }

    /// Overwrites `c` with `a * b`.
    ///
    /// The lane strategy allocates and drops its own B^T buffer, so the
    /// transpose is part of what it costs.
    ///
    /// # Errors
    ///
    /// - [`MatmulError::Length`] if the three matrices differ in size
    /// - [`MatmulError::Shape`] / [`MatmulError::Backend`] from the lane path,
    ///   raised before anything is allocated or written
    pub fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
        let n = a.n();
        same_size("B", b, n)?;
        same_size("C", c, n)?;

        match *self {
            Strategy::Scalar => {
                init::set_zero(c.as_mut_slice());
                naive_ijk::matmul_naive_ijk(a.as_slice(), b.as_slice(), c.as_mut_slice(), n);
            }
            Strategy::Lanes(backend) => {
                check_shape(n)?;
                if !backend.is_supported() {
                    return Err(MatmulError::Backend(backend));
                }

                let mut bt = Matrix::zeros(n)?;
                transpose::transpose(b.as_slice(), bt.as_mut_slice(), n);
                debug!(n, %backend, "transposed right operand");

                matmul_transposed(a.as_slice(), bt.as_slice(), c.as_mut_slice(), n, backend)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Scalar => write!(f, "scalar (i-j-k)"),
            Strategy::Lanes(backend) => write!(f, "transposed {}", backend),
        }
    }
}

fn same_size(name: &'static str, m: &Matrix, n: usize) -> Result<()> {
    if m.n() != n {
        return Err(MatmulError::Length {
            name,
            expected: n * n,
            actual: m.n() * m.n(),
        });
    }
    Ok(())
}
