//! 16-lane AVX-512 dot kernel.

use super::Lanes;

/// One ZMM register of 16 f32 lanes.
pub struct F32x16;

impl Lanes for F32x16 {
    const WIDTH: usize = 16;

    #[inline]
    unsafe fn dot(a: &[f32], b: &[f32]) -> f32 {
        unsafe { dot_avx512(a, b) }
    }
}

/// Computes sum(a[k] * b[k]) with 16-wide FMA and a final lane reduction.
///
/// Loads are unaligned so any slice works; on 64-byte aligned matrix rows
/// they cost the same as aligned loads.
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports AVX-512F (checked via `#[target_feature]`)
/// - `a.len() == b.len()` and the length is a multiple of 16
#[target_feature(enable = "avx512f")]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn dot_avx512(a: &[f32], b: &[f32]) -> f32 {
    use std::arch::x86_64::*;

    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len() % 16, 0);

    let mut acc = _mm512_setzero_ps();

    for k in (0..a.len()).step_by(16) {
        let va = _mm512_loadu_ps(a.as_ptr().add(k));
        let vb = _mm512_loadu_ps(b.as_ptr().add(k));

        // acc += va * vb, one rounding
        acc = _mm512_fmadd_ps(va, vb, acc);
    }

    _mm512_reduce_add_ps(acc)
}
