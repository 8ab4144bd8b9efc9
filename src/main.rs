//! # veclane — lane-wise i8 multiply
//!
//! Usage:
//!   veclane mul --a 1,2,3 --b 4,5,6            # Multiply with the detected backend
//!   veclane mul --a 100 --b 3 --backend sse2   # Force a backend
//!   veclane backends                           # List backends and CPU support
//!   veclane verify --trials 128                # Cross-check backends against scalar

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use veclane_core::VeclaneConfig;
use veclane_kernel::{multiply_i8_with, Backend, KernelError};

#[derive(Parser)]
#[command(
    name = "veclane",
    version,
    about = "Lane-wise wrapping i8 multiply with SIMD backends"
)]
struct Cli {
    /// Config file (default: ~/.veclane/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Multiply two comma-separated i8 vectors
    Mul {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        a: Vec<i8>,

        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        b: Vec<i8>,

        /// Backend name, or "auto"
        #[arg(long)]
        backend: Option<String>,
    },

    /// List backends, lane widths and CPU support
    Backends,

    /// Compare every available backend with the scalar reference on random data
    Verify {
        /// Largest vector length per trial
        #[arg(long)]
        len: Option<usize>,

        #[arg(long)]
        trials: Option<u32>,

        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "veclane=debug,veclane_kernel=debug,veclane_core=debug"
    } else {
        "veclane=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => VeclaneConfig::load_from(path)?,
        None => VeclaneConfig::load()?,
    };

    match cli.command {
        Command::Mul { a, b, backend } => {
            let backend = resolve_backend(backend.as_deref(), &config)?;
            if a.len() != b.len() {
                bail!("--a has {} elements but --b has {}", a.len(), b.len());
            }
            let mut out = vec![0i8; a.len()];
            multiply_i8_with(backend, &a, &b, &mut out, a.len())?;
            tracing::debug!("Multiplied {} lanes with {}", out.len(), backend);

            let rendered: Vec<String> = out.iter().map(|x| x.to_string()).collect();
            println!("{}", rendered.join(","));
        }
        Command::Backends => {
            let detected = Backend::detect();
            for backend in Backend::ALL {
                let status = if backend == detected {
                    "detected"
                } else if backend.is_available() {
                    "available"
                } else {
                    "unsupported"
                };
                println!("{:<10} {:>3} lanes  {}", backend, backend.lanes(), status);
            }
        }
        Command::Verify { len, trials, seed } => {
            let max_len = len.unwrap_or(config.verify.max_len);
            let trials = trials.unwrap_or(config.verify.trials);
            let seed = seed.unwrap_or(config.verify.seed);
            verify(max_len, trials, seed)?;
        }
    }

    Ok(())
}

/// A `--backend` flag wins over the config file; "auto" picks the widest
/// backend the CPU supports.
fn resolve_backend(flag: Option<&str>, config: &VeclaneConfig) -> Result<Backend> {
    let backend = match flag {
        Some(name) => Backend::resolve(name),
        None => Backend::from_config(config),
    };
    backend.context("Invalid backend")
}

fn verify(max_len: usize, trials: u32, seed: u64) -> Result<()> {
    let backends = Backend::available();
    tracing::info!(
        "Verifying {} backend(s) over {} trials (max_len={}, seed={})",
        backends.len(),
        trials,
        max_len,
        seed
    );

    let failures = count_mismatches(&backends, max_len, trials, seed, |backend, a, b, out| {
        let n = out.len();
        multiply_i8_with(backend, a, b, out, n)
    })?;

    if failures > 0 {
        bail!("{failures} mismatching run(s)");
    }
    println!("✅ {} backend(s) match scalar across {} trials", backends.len(), trials);
    Ok(())
}

/// Run every backend through `multiply` on random vectors and count the
/// runs that disagree with the scalar reference.
///
/// Random lengths alternate between exact multiples of 32 (16 and 32
/// lane boundaries) and arbitrary lengths that leave a tail.
fn count_mismatches<F>(
    backends: &[Backend],
    max_len: usize,
    trials: u32,
    seed: u64,
    multiply: F,
) -> Result<usize>
where
    F: Fn(Backend, &[i8], &[i8], &mut [i8]) -> std::result::Result<(), KernelError>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut failures = 0usize;

    for trial in 0..trials {
        let n = if trial % 2 == 0 {
            (rng.gen_range(0..=max_len) / 32) * 32
        } else {
            rng.gen_range(0..=max_len)
        };
        let a: Vec<i8> = (0..n).map(|_| rng.gen_range(i8::MIN..=i8::MAX)).collect();
        let b: Vec<i8> = (0..n).map(|_| rng.gen_range(i8::MIN..=i8::MAX)).collect();

        let mut want = vec![0i8; n];
        multiply_i8_with(Backend::Scalar, &a, &b, &mut want, n)?;

        for &backend in backends {
            let mut got = vec![0i8; n];
            multiply(backend, &a, &b, &mut got)?;
            if let Some(i) = (0..n).find(|&i| got[i] != want[i]) {
                failures += 1;
                tracing::error!(
                    "{backend}: n={n} lane {i}: {} * {} gave {}, expected {}",
                    a[i],
                    b[i],
                    got[i],
                    want[i]
                );
            }
        }
    }

    Ok(failures)
}
