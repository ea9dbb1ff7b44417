/// Naive matrix multiplication using i-j-k loop order.
///
/// This is the textbook triple-loop implementation and the oracle every
/// lane kernel is checked against. It's slow because the innermost loop
/// reads B with stride `n` (column-wise), missing cache on every step.
///
/// Each product is rounded before it is added and k runs strictly upward,
/// so repeated runs over the same inputs are bit-identical.
///
/// # Arguments
///
/// * `a` - Matrix A (n × n), row-major
/// * `b` - Matrix B (n × n), row-major
/// * `c` - Matrix C (n × n), row-major, accumulated into (C += A * B)
/// * `n` - Matrix dimension
///
/// # Panics
///
/// Panics if any slice does not hold `n * n` elements.
pub fn matmul_naive_ijk(a: &[f32], b: &[f32], c: &mut [f32], n: usize) {
    assert_eq!(a.len(), n * n, "A: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(b.len(), n * n, "B: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(c.len(), n * n, "C: expected {}x{}={} elements", n, n, n * n);

    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                let product = a[i * n + k] * b[k * n + j];
                c[i * n + j] += product;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_2x2() {
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![5.0, 6.0, 7.0, 8.0];
        let mut c = vec![0.0; 4];

        matmul_naive_ijk(&a, &b, &mut c, 2);

        assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_accumulates_into_c() {
        let a = vec![1.0; 9];
        let b = vec![1.0; 9];
        let mut c = vec![10.0; 9];

        matmul_naive_ijk(&a, &b, &mut c, 3);

        assert!(c.iter().all(|&x| x == 13.0));
    }

    #[test]
    fn test_bit_reproducible() {
        let n = 24;
        let a: Vec<f32> = (0..n * n).map(|i| 1.0 + (i % 100) as f32 * 0.001).collect();
        let b: Vec<f32> = (0..n * n).map(|i| 2.0 + (i % 100) as f32 * 0.001).collect();
        let mut c1 = vec![0.0; n * n];
        let mut c2 = vec![0.0; n * n];

        matmul_naive_ijk(&a, &b, &mut c1, n);
        matmul_naive_ijk(&a, &b, &mut c2, n);

        let bits1: Vec<u32> = c1.iter().map(|x| x.to_bits()).collect();
        let bits2: Vec<u32> = c2.iter().map(|x| x.to_bits()).collect();
        assert_eq!(bits1, bits2);
    }
}
