//! # mantel CLI entry point
//!
//! Parses command-line arguments, installs logging, and runs the test.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mantel_cli::run::{run_mantel, RunArgs};
use mantel_core::MantelError;

/// Mantel test between string-form and meaning-form edit distances.
///
/// Reads `string,meaning` pairs, computes normalized edit distances within
/// each column, and prints the veridical correlation r, the null mean and
/// standard deviation, and the Z-score.
#[derive(Parser, Debug)]
#[command(name = "mantel", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("mantel CLI starting");

    match run_mantel(&cli.run, cli.config.as_deref()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            match e.downcast_ref::<MantelError>() {
                Some(kind) => tracing::error!(kind = %kind.kind(), "{e:#}"),
                None => tracing::error!("{e:#}"),
            }
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mantel_cli::config::OutputFormat;

    #[test]
    fn cli_parse_file_only() {
        let cli = Cli::try_parse_from(["mantel", "pairs.csv"]).unwrap();
        assert_eq!(cli.run.file, PathBuf::from("pairs.csv"));
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert!(cli.run.randomizations.is_none());
        assert!(cli.run.seed.is_none());
        assert!(cli.run.workers.is_none());
        assert!(cli.run.format.is_none());
    }

    #[test]
    fn cli_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "mantel",
            "-vv",
            "--config",
            "mantel.yaml",
            "-r",
            "500",
            "--seed",
            "7",
            "--workers",
            "4",
            "--format",
            "json",
            "pairs.csv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("mantel.yaml")));
        assert_eq!(cli.run.randomizations, Some(500));
        assert_eq!(cli.run.seed, Some(7));
        assert_eq!(cli.run.workers, Some(4));
        assert_eq!(cli.run.format, Some(OutputFormat::Json));
    }

    #[test]
    fn cli_parse_long_randomizations() {
        let cli = Cli::try_parse_from(["mantel", "--randomizations", "20", "pairs.csv"]).unwrap();
        assert_eq!(cli.run.randomizations, Some(20));
    }

    #[test]
    fn cli_requires_file() {
        assert!(Cli::try_parse_from(["mantel"]).is_err());
    }

    #[test]
    fn cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["mantel", "--format", "xml", "pairs.csv"]).is_err());
    }
}
