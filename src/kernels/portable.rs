//! 16-lane fallback in a plain array.
//!
//! Same accumulation order as the AVX-512 kernel (lane `l` sees
//! `k = l, l + 16, l + 32, ...`), so it is the reference for what the wide
//! kernel should produce on machines without it.

use super::Lanes;

const WIDTH: usize = 16;

pub struct Portable;

impl Lanes for Portable {
    const WIDTH: usize = WIDTH;

    #[inline]
    unsafe fn dot(a: &[f32], b: &[f32]) -> f32 {
        dot_portable(a, b)
    }
}

/// Computes sum(a[k] * b[k]) with 16 independent `mul_add` accumulators.
///
/// # Panics
///
/// Panics if the lengths differ or are not a multiple of 16.
pub fn dot_portable(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "dot: length mismatch");
    assert_eq!(a.len() % WIDTH, 0, "dot: length {} not a multiple of {}", a.len(), WIDTH);

    let mut acc = [0.0f32; WIDTH];

    for (va, vb) in a.chunks_exact(WIDTH).zip(b.chunks_exact(WIDTH)) {
        for l in 0..WIDTH {
            acc[l] = va[l].mul_add(vb[l], acc[l]);
        }
    }

    acc.iter().sum()
}
