//! Benchmark and validation: run both strategies on the same inputs, time
//! them, and check the lane result against the scalar one cell by cell.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::Result;
use crate::kernels::Backend;
use crate::matrix::Matrix;
use crate::strategy::Strategy;
use crate::transposed::check_shape;

/// Default matrix dimension.
pub const DEFAULT_SIZE: usize = 512;

/// Default tolerance: a loose sanity check, not a precision bound.
pub const DEFAULT_TOLERANCE: Tolerance = Tolerance::Absolute(0.1);

/// How far apart two results may be and still count as equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// `|x - y| <= eps`
    Absolute(f32),
    /// `|x - y| <= eps * max(|x|, |y|)`
    Relative(f32),
}

impl Tolerance {
    /// NaN on either side never passes.
    pub fn accepts(self, x: f32, y: f32) -> bool {
        let diff = (x - y).abs();
        match self {
            Tolerance::Absolute(eps) => diff <= eps,
            Tolerance::Relative(eps) => diff <= eps * x.abs().max(y.abs()),
        }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tolerance::Absolute(eps) => write!(f, "absolute {}", eps),
            Tolerance::Relative(eps) => write!(f, "relative {}", eps),
        }
    }
}

/// Outcome of comparing two products.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Ok,
    /// First cell (row-major order) outside tolerance.
    Mismatch {
        row: usize,
        col: usize,
        expected: f32,
        actual: f32,
    },
}

/// Result of [`compare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub verdict: Verdict,
    /// Largest `|expected - actual|` over all cells.
    pub max_abs_diff: f32,
}

/// Checks every cell of `actual` against `expected` (both n × n).
///
/// # Panics
///
/// Panics if the slices differ in length or do not hold `n * n` floats.
pub fn compare(expected: &[f32], actual: &[f32], n: usize, tolerance: Tolerance) -> Comparison {
    assert_eq!(expected.len(), n * n, "expected: wrong length");
    assert_eq!(actual.len(), n * n, "actual: wrong length");

    let mut verdict = Verdict::Ok;
    let mut max_abs_diff = 0.0f32;

    for (idx, (&e, &a)) in expected.iter().zip(actual).enumerate() {
        let diff = (e - a).abs();
        if diff.is_nan() || diff > max_abs_diff {
            max_abs_diff = diff;
        }
        if verdict == Verdict::Ok && !tolerance.accepts(e, a) {
            verdict = Verdict::Mismatch {
                row: idx / n,
                col: idx % n,
                expected: e,
                actual: a,
            };
        }
    }

    Comparison {
        verdict,
        max_abs_diff,
    }
}

/// Runs `f` once and returns its output with the wall time it took.
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// GFLOPS for one n × n × n product taking `elapsed`.
pub fn gflops(n: usize, elapsed: Duration) -> f64 {
    2.0 * (n * n * n) as f64 / elapsed.as_secs_f64() / 1e9
}

/// What to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchConfig {
    size: usize,
    tolerance: Tolerance,
    backend: Option<Backend>,
}

impl BenchConfig {
    /// Fails with [`MatmulError::Shape`](crate::MatmulError::Shape) unless
    /// `size` is a positive multiple of the lane width.
    pub fn new(size: usize) -> Result<Self> {
        check_shape(size)?;
        Ok(Self {
            size,
            tolerance: DEFAULT_TOLERANCE,
            backend: None,
        })
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Pin the lane backend instead of auto-detecting.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// The requested backend, or the widest one this CPU supports.
    pub fn backend(&self) -> Backend {
        self.backend.unwrap_or_else(Backend::detect)
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            tolerance: DEFAULT_TOLERANCE,
            backend: None,
        }
    }
}

/// Everything one benchmark run measured.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub size: usize,
    pub backend: Backend,
    pub tolerance: Tolerance,
    pub scalar_time: Duration,
    /// Transpose plus lane multiply.
    pub lanes_time: Duration,
    /// C[0, 0] from each path.
    pub scalar_sample: f32,
    pub lanes_sample: f32,
    pub comparison: Comparison,
}

impl Report {
    /// Scalar time ÷ lane time.
    pub fn speedup(&self) -> f64 {
        self.scalar_time.as_secs_f64() / self.lanes_time.as_secs_f64()
    }

    pub fn passed(&self) -> bool {
        self.comparison.verdict == Verdict::Ok
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size;
        writeln!(f, "Matrix size: {} x {}", n, n)?;
        writeln!(f, "Lanes: {}", self.backend)?;
        writeln!(f, "{}", "-".repeat(50))?;
        writeln!(
            f,
            "1. {:24} {:10.3} ms  {:7.2} GFLOPS",
            Strategy::Scalar.to_string(),
            self.scalar_time.as_secs_f64() * 1000.0,
            gflops(n, self.scalar_time)
        )?;
        writeln!(
            f,
            "2. {:24} {:10.3} ms  {:7.2} GFLOPS",
            Strategy::Lanes(self.backend).to_string(),
            self.lanes_time.as_secs_f64() * 1000.0,
            gflops(n, self.lanes_time)
        )?;
        writeln!(f, "Speedup: x{:.2}", self.speedup())?;
        writeln!(
            f,
            "check C[0]: scalar = {:.6}, lanes = {:.6}",
            self.scalar_sample, self.lanes_sample
        )?;
        writeln!(
            f,
            "max |diff| over {} cells: {:e} (tolerance: {})",
            n * n,
            self.comparison.max_abs_diff,
            self.tolerance
        )?;
        match self.comparison.verdict {
            Verdict::Ok => write!(f, "ok"),
            Verdict::Mismatch {
                row,
                col,
                expected,
                actual,
            } => write!(
                f,
                "ERROR: C[{}, {}] scalar = {}, lanes = {}, outside tolerance",
                row, col, expected, actual
            ),
        }
    }
}

/// Runs the full benchmark described by `config`.
///
/// A verdict mismatch is part of the returned [`Report`], not an error.
/// All four matrices and the transpose buffer are dropped before this
/// returns, on success and on every error path.
///
/// # Errors
///
/// - [`MatmulError::Shape`](crate::MatmulError::Shape) before any allocation
/// - [`MatmulError::Backend`](crate::MatmulError::Backend) if a pinned
///   backend is missing, before any allocation
/// - [`MatmulError::Allocation`](crate::MatmulError::Allocation)
pub fn run(config: &BenchConfig) -> Result<Report> {
    let n = config.size();
    check_shape(n)?;

    let backend = config.backend();
    if !backend.is_supported() {
        return Err(crate::MatmulError::Backend(backend));
    }
    info!(n, %backend, tolerance = %config.tolerance(), "starting benchmark");

    let a = Matrix::pattern(n, 1.0)?;
    let b = Matrix::pattern(n, 2.0)?;
    let mut c_scalar = Matrix::zeros(n)?;
    let mut c_lanes = Matrix::zeros(n)?;

    let (res, scalar_time) = measure(|| Strategy::Scalar.multiply(&a, &b, &mut c_scalar));
    res?;
    info!(ms = scalar_time.as_secs_f64() * 1000.0, "scalar done");

    let (res, lanes_time) = measure(|| Strategy::Lanes(backend).multiply(&a, &b, &mut c_lanes));
    res?;
    info!(ms = lanes_time.as_secs_f64() * 1000.0, "lanes done");

    let comparison = compare(c_scalar.as_slice(), c_lanes.as_slice(), n, config.tolerance());
    if let Verdict::Mismatch { row, col, expected, actual } = comparison.verdict {
        warn!(row, col, expected, actual, "lane result outside tolerance");
    }

    Ok(Report {
        size: n,
        backend,
        tolerance: config.tolerance(),
        scalar_time,
        lanes_time,
        scalar_sample: c_scalar.get(0, 0),
        lanes_sample: c_lanes.get(0, 0),
        comparison,
    })
}
