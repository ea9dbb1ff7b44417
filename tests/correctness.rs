use matmul_lanes::bench::{BenchConfig, DEFAULT_TOLERANCE, Tolerance, Verdict, compare, run};
use matmul_lanes::matrix::init::{fill_identity, fill_pattern, fill_uniform};
use matmul_lanes::matrix::naive_ijk::matmul_naive_ijk;
use matmul_lanes::matrix::transpose::transpose;
use matmul_lanes::transposed::matmul_transposed;
use matmul_lanes::{Backend, MatmulError, Matrix, Strategy, multiply, multiply_scalar};

fn assert_matrices_close(expected: &[f32], actual: &[f32], tol: f32, name: &str) {
    assert_eq!(expected.len(), actual.len(), "{}: length mismatch", name);
    for i in 0..expected.len() {
        assert!(
            (expected[i] - actual[i]).abs() <= tol,
            "{}: mismatch at index {}: expected {}, got {}",
            name,
            i,
            expected[i],
            actual[i]
        );
    }
}

fn pattern(n: usize, value: f32) -> Vec<f32> {
    let mut m = vec![0.0; n * n];
    fill_pattern(&mut m, value);
    m
}

/// B^T, then the lane kernel on `backend`.
fn lanes(a: &[f32], b: &[f32], n: usize, backend: Backend) -> Vec<f32> {
    let mut bt = vec![0.0; n * n];
    transpose(b, &mut bt, n);
    let mut c = vec![0.0; n * n];
    matmul_transposed(a, &bt, &mut c, n, backend).unwrap();
    c
}

fn scalar(a: &[f32], b: &[f32], n: usize) -> Vec<f32> {
    let mut c = vec![0.0; n * n];
    matmul_naive_ijk(a, b, &mut c, n);
    c
}

// ============================================================
// Whole-matrix agreement
// ============================================================

#[test]
fn test_every_cell_within_tolerance() {
    for n in [16, 32, 64, 128] {
        let a = pattern(n, 1.0);
        let b = pattern(n, 2.0);
        let c_ref = scalar(&a, &b, n);

        for backend in Backend::available() {
            let c_vec = lanes(&a, &b, n, backend);
            let cmp = compare(&c_ref, &c_vec, n, DEFAULT_TOLERANCE);
            assert_eq!(cmp.verdict, Verdict::Ok, "{} n = {}", backend, n);
        }
    }
}

#[test]
fn test_reference_size_512() {
    let n = 512;
    let a = pattern(n, 1.0);
    let b = pattern(n, 2.0);
    let c_ref = scalar(&a, &b, n);
    let c_vec = lanes(&a, &b, n, Backend::detect());

    assert_matrices_close(&c_ref, &c_vec, 0.1, "512 pattern");
}

#[test]
fn test_signed_inputs() {
    let n = 48;
    let a: Vec<f32> = (0..n * n).map(|i| ((i * 7) % 13) as f32 * 0.25 - 1.5).collect();
    let b: Vec<f32> = (0..n * n).map(|i| ((i * 5) % 11) as f32 * -0.125 + 0.5).collect();
    let c_ref = scalar(&a, &b, n);

    for backend in Backend::available() {
        let c_vec = lanes(&a, &b, n, backend);
        assert_matrices_close(&c_ref, &c_vec, 1e-3, &format!("signed {}", backend));
    }
}

// ============================================================
// Known values
// ============================================================

#[test]
fn test_uniform_32_is_64() {
    let n = 32;
    let mut a = vec![0.0; n * n];
    let mut b = vec![0.0; n * n];
    fill_uniform(&mut a, 1.0);
    fill_uniform(&mut b, 2.0);

    let c_ref = scalar(&a, &b, n);
    assert!(c_ref.iter().all(|&x| x == 64.0), "scalar must be exact");

    for backend in Backend::available() {
        let c_vec = lanes(&a, &b, n, backend);
        assert_matrices_close(&vec![64.0; n * n], &c_vec, 0.1, &format!("uniform {}", backend));
    }
}

#[test]
fn test_identity_left() {
    let n = 64;
    let mut id = vec![0.0; n * n];
    fill_identity(&mut id, n);
    let b = pattern(n, 2.0);

    assert_eq!(scalar(&id, &b, n), b, "scalar I*B must equal B exactly");

    for backend in Backend::available() {
        let c_vec = lanes(&id, &b, n, backend);
        assert_matrices_close(&b, &c_vec, 1e-6, &format!("identity {}", backend));
    }
}

#[test]
fn test_zero_matrix() {
    let n = 32;
    let a = pattern(n, 3.0);
    let zero = vec![0.0; n * n];

    assert!(scalar(&a, &zero, n).iter().all(|&x| x == 0.0));
    assert!(scalar(&zero, &a, n).iter().all(|&x| x == 0.0));

    for backend in Backend::available() {
        assert!(lanes(&a, &zero, n, backend).iter().all(|&x| x == 0.0));
        assert!(lanes(&zero, &a, n, backend).iter().all(|&x| x == 0.0));
    }
}

#[test]
fn test_2x2_scalar() {
    let a = vec![1.0, 2.0, 3.0, 4.0];
    let b = vec![5.0, 6.0, 7.0, 8.0];
    let mut c = vec![-9.0; 4];

    multiply_scalar(&a, &b, &mut c, 2).unwrap();

    assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
}

// ============================================================
// Shape and length rejection
// ============================================================

#[test]
fn test_shape_rejection_17() {
    let n = 17;
    let a = vec![1.0; n * n];
    let bt = vec![1.0; n * n];
    let mut c = vec![0.0; n * n];

    for backend in Backend::ALL {
        assert_eq!(
            matmul_transposed(&a, &bt, &mut c, n, backend),
            Err(MatmulError::Shape { size: 17, lanes: 16 })
        );
    }
    assert!(c.iter().all(|&x| x == 0.0), "nothing may be written");

    assert_eq!(
        multiply(&a, &bt, &mut c, n),
        Err(MatmulError::Shape { size: 17, lanes: 16 })
    );
}

#[test]
fn test_tile_boundary_sizes() {
    for n in [15, 16, 17, 31, 32, 33, 47, 48] {
        let a = vec![1.0; n * n];
        let b = vec![1.0; n * n];
        let mut c = vec![0.0; n * n];

        let result = multiply(&a, &b, &mut c, n);

        if n % 16 == 0 {
            assert!(result.is_ok(), "n = {}", n);
            assert!(c.iter().all(|&x| x == n as f32), "n = {}", n);
        } else {
            assert!(matches!(result, Err(MatmulError::Shape { .. })), "n = {}", n);
        }
    }
}

#[test]
fn test_length_rejection() {
    let a = vec![1.0; 256];
    let b = vec![1.0; 256];
    let mut c = vec![0.0; 255];

    assert!(matches!(
        multiply(&a, &b, &mut c, 16),
        Err(MatmulError::Length { name: "C", expected: 256, actual: 255 })
    ));
}

#[test]
fn test_overflowing_size_is_length_error() {
    let n = usize::MAX / 16 * 16;
    let mut c: Vec<f32> = Vec::new();

    assert!(matches!(
        multiply(&[], &[], &mut c, n),
        Err(MatmulError::Length { name: "A", expected: usize::MAX, actual: 0 })
    ));
    assert!(matches!(
        matmul_transposed(&[], &[], &mut c, n, Backend::Portable),
        Err(MatmulError::Length { .. })
    ));
}

// ============================================================
// Determinism
// ============================================================

#[test]
fn test_scalar_bit_identical_runs() {
    let n = 64;
    let a = pattern(n, 1.0);
    let b = pattern(n, 2.0);

    let first: Vec<u32> = scalar(&a, &b, n).iter().map(|x| x.to_bits()).collect();
    let second: Vec<u32> = scalar(&a, &b, n).iter().map(|x| x.to_bits()).collect();

    assert_eq!(first, second);
}

#[test]
fn test_portable_close_to_avx512() {
    if !Backend::Avx512.is_supported() {
        println!("Skipping - AVX-512 not available");
        return;
    }

    // Same lane layout; only the final reduction tree may differ.
    let n = 64;
    let a = pattern(n, 1.0);
    let b = pattern(n, 2.0);

    let c_portable = lanes(&a, &b, n, Backend::Portable);
    let c_avx512 = lanes(&a, &b, n, Backend::Avx512);

    assert_matrices_close(&c_portable, &c_avx512, 1e-3, "portable vs avx512");
}

// ============================================================
// Strategies and the benchmark
// ============================================================

#[test]
fn test_strategies_interchangeable() {
    let n = 48;
    let a = Matrix::pattern(n, 1.0).unwrap();
    let b = Matrix::pattern(n, 2.0).unwrap();

    let mut reference = Matrix::zeros(n).unwrap();
    Strategy::Scalar.multiply(&a, &b, &mut reference).unwrap();

    for backend in Backend::available() {
        let mut c = Matrix::zeros(n).unwrap();
        Strategy::Lanes(backend).multiply(&a, &b, &mut c).unwrap();
        let cmp = compare(reference.as_slice(), c.as_slice(), n, Tolerance::Relative(1e-5));
        assert_eq!(cmp.verdict, Verdict::Ok, "{}", backend);
    }
}

#[test]
fn test_bench_every_backend() {
    for backend in Backend::available() {
        let config = BenchConfig::new(32).unwrap().with_backend(backend);
        let report = run(&config).unwrap();

        assert!(report.passed(), "{}", report);
        assert_eq!(report.backend, backend);
        assert!(report.comparison.max_abs_diff <= 0.1);
    }
}

#[test]
fn test_bench_rejects_before_allocating() {
    assert_eq!(
        BenchConfig::new(17),
        Err(MatmulError::Shape { size: 17, lanes: 16 })
    );
}

#[test]
fn test_bench_missing_backend() {
    for backend in Backend::ALL {
        if backend.is_supported() {
            continue;
        }
        let config = BenchConfig::new(16).unwrap().with_backend(backend);
        assert_eq!(run(&config), Err(MatmulError::Backend(backend)));
    }
}

#[test]
fn test_tight_tolerance_reports_mismatch() {
    // Zero tolerance with a lane order that differs from the scalar one:
    // either it happens to be exact or it is flagged, never an error.
    let config = BenchConfig::new(64)
        .unwrap()
        .with_tolerance(Tolerance::Absolute(0.0));

    let report = run(&config).unwrap();

    match report.comparison.verdict {
        Verdict::Ok => assert_eq!(report.comparison.max_abs_diff, 0.0),
        Verdict::Mismatch { expected, actual, .. } => assert_ne!(expected, actual),
    }
}
