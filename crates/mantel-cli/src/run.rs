//! # Run Command
//!
//! Reads a pairs file, computes edit distances within each column, runs the
//! Mantel test between the columns, and prints the report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use mantel_core::{run_mantel_on_pairs, MantelTest};

use crate::config::{FileConfig, OutputFormat, Overrides, RunConfig};
use crate::input::read_pairs;
use crate::report::Report;

/// Arguments for a Mantel run.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Comma-separated file of `string,meaning` records, one per line.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of Monte Carlo randomizations [default: 10000].
    #[arg(short, long)]
    pub randomizations: Option<usize>,

    /// Seed for the random source; omit to seed from OS entropy.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads for the Monte Carlo loop [default: 1].
    #[arg(long)]
    pub workers: Option<usize>,

    /// Report format [default: text].
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl RunArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            randomizations: self.randomizations,
            seed: self.seed,
            workers: self.workers,
            format: self.format,
        }
    }
}

/// Resolve configuration from flags and an optional config file.
pub fn resolve_config(args: &RunArgs, config_path: Option<&Path>) -> Result<RunConfig> {
    let file = match config_path {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    Ok(RunConfig::resolve(&args.overrides(), &file))
}

/// Run the test on `file` under `config` and return the report.
pub fn execute(file: &Path, config: &RunConfig) -> Result<Report> {
    let pairs = read_pairs(file)?;
    let test = MantelTest::new(config.randomizations)?.with_workers(config.workers)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::info!(
        file = %file.display(),
        items = pairs.len(),
        randomizations = config.randomizations,
        workers = config.workers,
        seed = ?config.seed,
        "running Mantel test"
    );

    let result = run_mantel_on_pairs(&pairs.strings, &pairs.meanings, &test, &mut rng)
        .with_context(|| format!("Mantel test failed for {}", file.display()))?;
    Ok(Report::new(pairs.len(), config, result))
}

/// Execute the run command and print the report to stdout.
///
/// Returns exit code 0 on success; errors propagate to the caller.
pub fn run_mantel(args: &RunArgs, config_path: Option<&Path>) -> Result<u8> {
    let config = resolve_config(args, config_path)?;
    let report = execute(&args.file, &config)?;
    println!("{}", report.render(config.format)?);
    Ok(0)
}
