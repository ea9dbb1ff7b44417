//! 4-lane NEON dot kernel.

use super::Lanes;

/// One Q register of 4 f32 lanes.
pub struct F32x4;

impl Lanes for F32x4 {
    const WIDTH: usize = 4;

    #[inline]
    unsafe fn dot(a: &[f32], b: &[f32]) -> f32 {
        unsafe { dot_neon(a, b) }
    }
}

/// Computes sum(a[k] * b[k]) with 4-wide `vfmaq_f32`.
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports NEON
/// - `a.len() == b.len()` and the length is a multiple of 4
#[target_feature(enable = "neon")]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn dot_neon(a: &[f32], b: &[f32]) -> f32 {
    use std::arch::aarch64::*;

    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len() % 4, 0);

    let mut acc = vdupq_n_f32(0.0);

    for k in (0..a.len()).step_by(4) {
        let va = vld1q_f32(a.as_ptr().add(k));
        let vb = vld1q_f32(b.as_ptr().add(k));
        acc = vfmaq_f32(acc, va, vb);
    }

    vaddvq_f32(acc)
}
