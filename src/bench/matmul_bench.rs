use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use matmul_lanes::matrix::init::fill_pattern;
use matmul_lanes::matrix::naive_ijk::matmul_naive_ijk;
use matmul_lanes::matrix::transpose::{TRANSPOSE_TILE, transpose, transpose_blocked};
use matmul_lanes::transposed::matmul_transposed;
use matmul_lanes::{Backend, Matrix};

const SIZES: [usize; 3] = [64, 128, 256];

fn inputs(n: usize) -> (Matrix, Matrix) {
    let a = Matrix::pattern(n, 1.0).expect("alloc A");
    let b = Matrix::pattern(n, 2.0).expect("alloc B");
    (a, b)
}

fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");

    for n in SIZES {
        group.throughput(Throughput::Elements((2 * n * n * n) as u64));
        let (a, b) = inputs(n);
        let bt = b.transposed().expect("alloc B^T");

        group.bench_with_input(BenchmarkId::new("scalar_ijk", n), &n, |bench, &n| {
            let mut out = Matrix::zeros(n).expect("alloc C");
            bench.iter(|| {
                out.as_mut_slice().fill(0.0);
                matmul_naive_ijk(black_box(a.as_slice()), black_box(b.as_slice()), out.as_mut_slice(), n);
            });
        });

        for backend in Backend::available() {
            group.bench_with_input(BenchmarkId::new(backend.name(), n), &n, |bench, &n| {
                let mut out = Matrix::zeros(n).expect("alloc C");
                bench.iter(|| {
                    matmul_transposed(
                        black_box(a.as_slice()),
                        black_box(bt.as_slice()),
                        out.as_mut_slice(),
                        n,
                        backend,
                    )
                    .expect("lane matmul");
                });
            });
        }
    }

    group.finish();
}

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");

    for n in [256, 1024] {
        let mut src = vec![0.0f32; n * n];
        fill_pattern(&mut src, 1.0);
        let mut dst = vec![0.0f32; n * n];

        group.bench_with_input(BenchmarkId::new("plain", n), &n, |bench, &n| {
            bench.iter(|| transpose(black_box(&src), &mut dst, n));
        });
        group.bench_with_input(BenchmarkId::new("blocked", n), &n, |bench, &n| {
            bench.iter(|| transpose_blocked(black_box(&src), &mut dst, n, TRANSPOSE_TILE));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matmul, bench_transpose);
criterion_main!(benches);
