//! Square f32 matrices: aligned storage, fills, transpose and the scalar
//! baseline.
//!
//! The free functions work on plain row-major slices so they can be fed
//! `Vec<f32>` in tests; [`Matrix`] bundles a dimension with an
//! [`AlignedBuffer`] for the benchmark.

pub mod aligned;
pub mod init;
pub mod naive_ijk;
pub mod transpose;

pub use aligned::{ALIGN, AlignedBuffer};

use crate::error::{MatmulError, Result};

/// An owned n × n row-major matrix in 64-byte aligned memory.
#[derive(Debug)]
pub struct Matrix {
    n: usize,
    data: AlignedBuffer,
}

impl Matrix {
    /// All-zero n × n matrix.
    pub fn zeros(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(MatmulError::Allocation {
                bytes: 0,
                align: ALIGN,
            });
        }
        let len = n.checked_mul(n).ok_or(MatmulError::Allocation {
            bytes: usize::MAX,
            align: ALIGN,
        })?;
        let data = AlignedBuffer::zeroed(len)?;
        Ok(Self { n, data })
    }

    /// Element (row, col) = `f(row, col)`.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f32) -> Result<Self> {
        let mut m = Self::zeros(n)?;
        for row in 0..n {
            for col in 0..n {
                m.data[row * n + col] = f(row, col);
            }
        }
        Ok(m)
    }

    /// See [`init::fill_pattern`].
    pub fn pattern(n: usize, value: f32) -> Result<Self> {
        let mut m = Self::zeros(n)?;
        init::fill_pattern(&mut m.data, value);
        Ok(m)
    }

    pub fn filled(n: usize, value: f32) -> Result<Self> {
        let mut m = Self::zeros(n)?;
        init::fill_uniform(&mut m.data, value);
        Ok(m)
    }

    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::zeros(n)?;
        init::fill_identity(&mut m.data, n);
        Ok(m)
    }

    /// Fresh matrix holding the transpose of `self`.
    pub fn transposed(&self) -> Result<Self> {
        let mut t = Self::zeros(self.n)?;
        transpose::transpose(&self.data, &mut t.data, self.n);
        Ok(t)
    }

    /// Matrix dimension.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if row or col is out of range.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.n && col < self.n, "({}, {}) outside {}x{}", row, col, self.n, self.n);
        self.data[row * self.n + col]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}
