//! Benchmark runner: scalar i-j-k vs. transposed FMA lanes.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use matmul_lanes::bench::{self, BenchConfig, DEFAULT_SIZE, Tolerance};
use matmul_lanes::{Backend, logging};

#[derive(Debug, Parser)]
#[command(name = "matmul-bench", version, about = "Time scalar vs. SIMD-lane f32 matmul and check they agree")]
struct Args {
    /// Matrix dimension (must be a multiple of 16)
    #[arg(short = 'n', long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Largest allowed difference per cell
    #[arg(short, long, default_value_t = 0.1)]
    tolerance: f32,

    /// Treat --tolerance as relative to the cell magnitude
    #[arg(long)]
    relative: bool,

    /// Lane backend to use
    #[arg(short, long, value_enum, default_value_t = BackendArg::Auto)]
    backend: BackendArg,

    /// Exit with status 1 if the results disagree
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    Auto,
    Avx512,
    Avx2,
    Neon,
    Portable,
}

impl BackendArg {
    fn resolve(self) -> Option<Backend> {
        match self {
            BackendArg::Auto => None,
            BackendArg::Avx512 => Some(Backend::Avx512),
            BackendArg::Avx2 => Some(Backend::Avx2),
            BackendArg::Neon => Some(Backend::Neon),
            BackendArg::Portable => Some(Backend::Portable),
        }
    }
}

fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    let result = run(&args);
    if let Err(err) = &result {
        eprintln!("error: {:#}", err);
    }
    exit_code(&result, args.strict)
}

/// 0 unless `--strict` and the results disagree (1), or the run failed (2).
fn exit_code(result: &Result<bool>, strict: bool) -> ExitCode {
    match result {
        Ok(passed) if *passed || !strict => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(_) => ExitCode::from(2),
    }
}

fn run(args: &Args) -> Result<bool> {
    println!("=== f32 Matrix Multiplication: scalar vs. lanes ===\n");

    let tolerance = if args.relative {
        Tolerance::Relative(args.tolerance)
    } else {
        Tolerance::Absolute(args.tolerance)
    };

    let mut config = BenchConfig::new(args.size)
        .context("invalid matrix size")?
        .with_tolerance(tolerance);
    if let Some(backend) = args.backend.resolve() {
        config = config.with_backend(backend);
    }

    let available: Vec<String> = Backend::available().iter().map(|b| b.name().to_string()).collect();
    println!("CPU lanes available: {}\n", available.join(", "));

    let report = bench::run(&config).context("benchmark failed")?;
    println!("{}", report);

    Ok(report.passed())
}
