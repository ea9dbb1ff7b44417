//! 8-lane AVX2 + FMA dot kernel.

use super::Lanes;

/// One YMM register of 8 f32 lanes.
pub struct F32x8;

impl Lanes for F32x8 {
    const WIDTH: usize = 8;

    #[inline]
    unsafe fn dot(a: &[f32], b: &[f32]) -> f32 {
        unsafe { dot_avx2(a, b) }
    }
}

/// Computes sum(a[k] * b[k]) with 8-wide FMA.
///
/// There is no single reduce instruction on AVX2, so the accumulator is
/// folded 256 → 128 → 64 → 32 bits.
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports AVX2 and FMA (checked via `#[target_feature]`)
/// - `a.len() == b.len()` and the length is a multiple of 8
#[target_feature(enable = "avx2,fma")]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn dot_avx2(a: &[f32], b: &[f32]) -> f32 {
    use std::arch::x86_64::*;

    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len() % 8, 0);

    let mut acc = _mm256_setzero_ps();

    for k in (0..a.len()).step_by(8) {
        let va = _mm256_loadu_ps(a.as_ptr().add(k));
        let vb = _mm256_loadu_ps(b.as_ptr().add(k));
        acc = _mm256_fmadd_ps(va, vb, acc);
    }

    // Horizontal sum
    let lo = _mm256_castps256_ps128(acc);
    let hi = _mm256_extractf128_ps(acc, 1);
    let sum128 = _mm_add_ps(lo, hi);
    let sum64 = _mm_add_ps(sum128, _mm_movehl_ps(sum128, sum128));
    let sum32 = _mm_add_ss(sum64, _mm_shuffle_ps(sum64, sum64, 1));
    _mm_cvtss_f32(sum32)
}
