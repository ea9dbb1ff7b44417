//! Lane kernels: one fused-multiply-add dot product per vector width.
//!
//! Every backend does the same three things over a pair of contiguous
//! runs: start from a zeroed accumulator, stream `WIDTH` floats of each run
//! through a fused multiply-add, and sum the accumulator lanes down to one
//! float. The cell loop that feeds them lives in [`crate::transposed`] and is
//! written once for all widths.
//!
//! The trait boundary is the whole dot product, not the individual register
//! ops. Register types like `__m512` may only cross function boundaries
//! inside code compiled with the matching `#[target_feature]`, so the
//! zero/load/fma/reduce steps stay inside one feature-gated function per
//! backend, where the intrinsics inline.
//!
//! Available kernels:
//! - `avx512`: 16 lanes, AVX-512F (x86_64)
//! - `avx2`: 8 lanes, AVX2 + FMA (x86_64)
//! - `neon`: 4 lanes, NEON (aarch64)
//! - `portable`: 16 lanes in a plain array, `f32::mul_add`, runs anywhere

#[cfg(target_arch = "x86_64")]
pub mod avx2;
#[cfg(target_arch = "x86_64")]
pub mod avx512;
#[cfg(target_arch = "aarch64")]
pub mod neon;
pub mod portable;

use std::fmt;

/// Widest lane count of any backend. Matrix sizes handed to the lane path
/// must be a multiple of this, which makes them a multiple of every
/// narrower width too.
pub const LANE_WIDTH: usize = 16;

/// A vector width the lane path can run on.
pub trait Lanes {
    /// Floats per vector register.
    const WIDTH: usize;

    /// Dot product of `a` and `b`: zeroed accumulator, one fused
    /// multiply-add per `WIDTH` floats, then a horizontal sum.
    ///
    /// # Safety
    ///
    /// Caller must ensure:
    /// - the running CPU supports this backend (see [`Backend::is_supported`])
    /// - `a.len() == b.len()`
    /// - `a.len()` is a multiple of `WIDTH`
    unsafe fn dot(a: &[f32], b: &[f32]) -> f32;
}

/// Instruction set backing the lane path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Avx512,
    Avx2,
    Neon,
    Portable,
}

impl Backend {
    /// All backends, widest first.
    pub const ALL: [Backend; 4] = [
        Backend::Avx512,
        Backend::Avx2,
        Backend::Neon,
        Backend::Portable,
    ];

    /// Picks the widest backend this CPU supports (AVX-512 > AVX2 > NEON >
    /// portable).
    pub fn detect() -> Backend {
        Self::ALL
            .into_iter()
            .find(|b| b.is_supported())
            .unwrap_or(Backend::Portable)
    }

    /// Backends this CPU can run, widest first. Never empty.
    pub fn available() -> Vec<Backend> {
        Self::ALL.into_iter().filter(|b| b.is_supported()).collect()
    }

    pub fn is_supported(self) -> bool {
        match self {
            #[cfg(target_arch = "x86_64")]
            Backend::Avx512 => is_x86_feature_detected!("avx512f"),
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma"),
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => std::arch::is_aarch64_feature_detected!("neon"),
            Backend::Portable => true,
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// Floats per vector register for this backend.
    pub fn width(self) -> usize {
        match self {
            Backend::Avx512 => 16,
            Backend::Avx2 => 8,
            Backend::Neon => 4,
            Backend::Portable => portable::Portable::WIDTH,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Backend::Avx512 => "AVX-512",
            Backend::Avx2 => "AVX2",
            Backend::Neon => "NEON",
            Backend::Portable => "portable",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-wide)", self.name(), self.width())
    }
}
