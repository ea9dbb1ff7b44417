/// Transpose a square matrix: dst = src^T
///
/// After transpose, what was column j of src becomes row j of dst. This is
/// what lets the lane kernel stream column j of B as a contiguous run.
///
/// Works for any `n`, including sizes the lane kernel rejects.
///
/// # Arguments
///
/// * `src` - Source matrix (n × n), row-major
/// * `dst` - Destination matrix (n × n), row-major, fully overwritten
/// * `n` - Matrix dimension
///
/// # Example
///
/// ```
/// use matmul_lanes::matrix::transpose::transpose;
///
/// let src = vec![1.0, 2.0,
///                3.0, 4.0];
/// let mut dst = vec![0.0; 4];
///
/// transpose(&src, &mut dst, 2);
///
/// assert_eq!(dst, vec![1.0, 3.0,
///                      2.0, 4.0]);
/// ```
///
/// # Panics
///
/// Panics if either slice does not hold `n * n` elements.
pub fn transpose(src: &[f32], dst: &mut [f32], n: usize) {
    assert_eq!(src.len(), n * n, "src: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(dst.len(), n * n, "dst: expected {}x{}={} elements", n, n, n * n);

    for i in 0..n {
        for j in 0..n {
            dst[j * n + i] = src[i * n + j];
        }
    }
}

/// Default tile edge for [`transpose_blocked`]: 16 floats is one cache line.
pub const TRANSPOSE_TILE: usize = 16;

/// Cache-blocked transpose, same result as [`transpose`].
///
/// Walks the matrix in `tile × tile` squares so both the stride-1 reads and
/// the stride-n writes stay inside a handful of cache lines. Pays off once
/// a row of the matrix no longer fits in L1.
///
/// # Panics
///
/// Panics if `tile` is zero or either slice does not hold `n * n` elements.
pub fn transpose_blocked(src: &[f32], dst: &mut [f32], n: usize, tile: usize) {
    assert!(tile > 0, "tile must be > 0");
    assert_eq!(src.len(), n * n, "src: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(dst.len(), n * n, "dst: expected {}x{}={} elements", n, n, n * n);

    for ii in (0..n).step_by(tile) {
        let i_end = (ii + tile).min(n);
        for jj in (0..n).step_by(tile) {
            let j_end = (jj + tile).min(n);
            for i in ii..i_end {
                for j in jj..j_end {
                    dst[j * n + i] = src[i * n + j];
                }
            }
        }
    }
}
