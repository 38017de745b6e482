//! hexmix command-line harness
//! Prints sample digests, writes the CSV comparison report, and benchmarks
//! the custom digest against SHA-256.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sha2::{Digest, Sha256};
use tracing_subscriber::EnvFilter;

use hexmix::report::{self, ReportConfig, DEFAULT_SAMPLES};
use hexmix::DEFAULT_HEX_LEN;

#[derive(Parser)]
#[command(name = "hexmix")]
#[command(version)]
#[command(about = "Non-cryptographic hex digest with SHA-256 comparison")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print custom and SHA-256 digests for each input
    Hash {
        /// Texts to digest (default: built-in samples)
        texts: Vec<String>,

        /// Output length in hex characters (even, 2..=64)
        #[arg(short, long, default_value_t = DEFAULT_HEX_LEN)]
        len: usize,
    },

    /// Write hash_results.csv, avalanche_results.csv and report.txt
    Report {
        /// Output directory
        #[arg(short, long, default_value = "results")]
        out_dir: PathBuf,

        /// Output length in hex characters (even, 2..=64)
        #[arg(short, long, default_value_t = DEFAULT_HEX_LEN)]
        len: usize,
    },

    /// Compare throughput against SHA-256
    Bench {
        /// Bytes of generated input
        #[arg(long, default_value_t = BenchConfig::default().size)]
        size: usize,

        /// Timed runs per algorithm (median is reported)
        #[arg(long, default_value_t = BenchConfig::default().repeat)]
        repeat: usize,
    },
}

struct BenchConfig {
    size: usize,
    repeat: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: 16_000_000, // 16 MB
            repeat: 3,
        }
    }
}

struct BenchResult {
    algorithm: &'static str,
    mb_per_sec: f64,
    digest_hex: String,
}

fn cmd_hash(texts: &[String], len: usize) -> Result<()> {
    let samples: Vec<String> = if texts.is_empty() {
        DEFAULT_SAMPLES.iter().map(|s| s.to_string()).collect()
    } else {
        texts.to_vec()
    };

    for text in &samples {
        println!("Input: {:?}", text);
        println!("  custom: {}", hexmix::digest(text.as_bytes(), len)?);
        println!("  sha256: {}", hexmix::sha256_hex(text.as_bytes()));
        println!();
    }
    Ok(())
}

fn cmd_report(out_dir: PathBuf, len: usize) -> Result<()> {
    let config = ReportConfig {
        out_dir,
        hex_len: len,
    };
    let paths = report::write_report(&config)?;

    println!("Results written to: {}", config.out_dir.display());
    println!("  - {}", paths.hashes.display());
    println!("  - {}", paths.avalanche.display());
    println!("  - {}", paths.summary.display());
    Ok(())
}

/// Deterministic filler data (not random in any strong sense).
fn generate_data(size: usize) -> Vec<u8> {
    let mut data = vec![0u8; size];
    let mut rng_state = 0x123456789abcdef0u64;
    for chunk in data.chunks_mut(8) {
        rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let bytes = rng_state.to_le_bytes();
        chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
    data
}

fn time_run<F: FnMut() -> String>(len: usize, mut f: F) -> (f64, String) {
    let start = Instant::now();
    let digest = f();
    let elapsed = start.elapsed().as_secs_f64().max(f64::EPSILON);
    ((len as f64 / 1_000_000.0) / elapsed, digest)
}

fn median(mut speeds: Vec<f64>) -> f64 {
    speeds.sort_by(|a, b| a.total_cmp(b));
    speeds[speeds.len() / 2]
}

fn cmd_bench(config: &BenchConfig) -> Result<()> {
    let repeat = config.repeat.max(1);
    let data = generate_data(config.size);
    tracing::info!(bytes = data.len(), repeat, "generated benchmark input");

    let mut results = Vec::new();

    let mut sha_speeds = Vec::with_capacity(repeat);
    let mut sha_digest = String::new();
    for _ in 0..repeat {
        let (speed, digest) = time_run(data.len(), || hex::encode(Sha256::digest(&data)));
        tracing::debug!(speed, "sha256 run");
        sha_speeds.push(speed);
        sha_digest = digest;
    }
    results.push(BenchResult {
        algorithm: "SHA-256",
        mb_per_sec: median(sha_speeds),
        digest_hex: sha_digest,
    });

    let mut custom_speeds = Vec::with_capacity(repeat);
    let mut custom_digest = String::new();
    for _ in 0..repeat {
        let (speed, digest) = time_run(data.len(), || hex::encode(hexmix::base_digest(&data)));
        tracing::debug!(speed, "hexmix run");
        custom_speeds.push(speed);
        custom_digest = digest;
    }
    results.push(BenchResult {
        algorithm: "hexmix",
        mb_per_sec: median(custom_speeds),
        digest_hex: custom_digest,
    });

    print_results_table(&results);
    Ok(())
}

fn print_results_table(results: &[BenchResult]) {
    println!("\n╔════════════════════════════════════════════════════╗");
    println!("║                 BENCHMARK RESULTS                  ║");
    println!("╠════════════════════════════════════════════════════╣");
    println!("║ Algorithm │     MB/s │ Speedup │ Digest            ║");
    println!("╠════════════════════════════════════════════════════╣");

    let baseline = results[0].mb_per_sec;
    for result in results {
        println!(
            "║ {:9} │ {:8.2} │ {:6.2}x │ {:16}… ║",
            result.algorithm,
            result.mb_per_sec,
            result.mb_per_sec / baseline,
            &result.digest_hex[..16]
        );
    }

    println!("╚════════════════════════════════════════════════════╝\n");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Hash { texts, len } => cmd_hash(&texts, len),
        Command::Report { out_dir, len } => cmd_report(out_dir, len),
        Command::Bench { size, repeat } => cmd_bench(&BenchConfig { size, repeat }),
    }
}
