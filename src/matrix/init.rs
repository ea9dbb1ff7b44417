//! Deterministic fills for benchmark and test inputs.
//!
//! All of these are pure functions of (size, value): the same call always
//! produces the same bits.

/// Fill with `value + (i % 100) * 0.001` for every linear index `i`.
///
/// The small ramp keeps the data from being all-equal, which would hide
/// indexing bugs (every permutation of a constant matrix is itself) and
/// invite the optimizer to fold the loops.
pub fn fill_pattern(m: &mut [f32], value: f32) {
    for (i, x) in m.iter_mut().enumerate() {
        *x = value + (i % 100) as f32 * 0.001;
    }
}

/// Fill every element with `value`.
pub fn fill_uniform(m: &mut [f32], value: f32) {
    m.fill(value);
}

pub fn set_zero(m: &mut [f32]) {
    m.fill(0.0);
}

/// Write the n × n identity.
///
/// # Panics
///
/// Panics if `m` does not hold `n * n` elements.
pub fn fill_identity(m: &mut [f32], n: usize) {
    assert_eq!(m.len(), n * n, "expected {}x{}={} elements", n, n, n * n);
    m.fill(0.0);
    for i in 0..n {
        m[i * n + i] = 1.0;
    }
}
