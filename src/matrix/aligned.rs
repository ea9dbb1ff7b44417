//! 64-byte aligned f32 storage.

use std::alloc::{self, Layout};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use tracing::debug;

use crate::error::{MatmulError, Result};

/// Alignment of every matrix buffer: one 512-bit register.
pub const ALIGN: usize = 64;

/// A zero-initialized, fixed-length block of `f32` aligned to [`ALIGN`].
///
/// Memory is released when the buffer is dropped, so an early `?` return
/// from a function holding several buffers frees all of them.
pub struct AlignedBuffer {
    ptr: NonNull<f32>,
    len: usize,
    layout: Layout,
}

impl AlignedBuffer {
    /// Allocates `len` zeroed floats.
    ///
    /// Returns [`MatmulError::Allocation`] if `len` is zero, the byte size
    /// overflows, or the allocator refuses the request.
    pub fn zeroed(len: usize) -> Result<Self> {
        let bytes = len
            .checked_mul(size_of::<f32>())
            .ok_or(MatmulError::Allocation {
                bytes: usize::MAX,
                align: ALIGN,
            })?;
        let failed = MatmulError::Allocation {
            bytes,
            align: ALIGN,
        };
        if bytes == 0 {
            return Err(failed);
        }
        let layout = Layout::from_size_align(bytes, ALIGN).map_err(|_| failed.clone())?;

        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw.cast::<f32>()).ok_or(failed)?;

        debug!(len, bytes, "allocated aligned buffer");
        Ok(Self { ptr, len, layout })
    }

    /// Number of floats in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Deref for AlignedBuffer {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        // SAFETY: ptr is a live allocation of `len` initialized floats.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for AlignedBuffer {
    fn deref_mut(&mut self) -> &mut [f32] {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        debug!(len = self.len, "releasing aligned buffer");
        // SAFETY: allocated in `zeroed` with the same layout.
        unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), self.layout) };
    }
}

impl std::fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

// The buffer uniquely owns its allocation, like a `Box<[f32]>`.
unsafe impl Send for AlignedBuffer {}
unsafe impl Sync for AlignedBuffer {}
