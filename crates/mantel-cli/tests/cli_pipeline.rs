//! End-to-end tests: pairs file on disk through to the rendered report,
//! both via the library entry points and the `mantel` binary.

use std::io::Write;
use std::process::Command;

use mantel_cli::config::{OutputFormat, RunConfig};
use mantel_cli::run::execute;
use mantel_core::{ErrorKind, MantelError};
use tempfile::NamedTempFile;

const CORRELATED: &str = "cat,feline\ncats,felines\ndog,canine\ndogs,canines\nbird,avian\n";
const EXPECTED_R: f64 = 0.891_275_396_162_5;

fn pairs_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

fn seeded(randomizations: usize, workers: usize) -> RunConfig {
    RunConfig {
        randomizations,
        seed: Some(42),
        workers,
        format: OutputFormat::Text,
    }
}

fn mantel() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mantel"))
}

#[test]
fn execute_reports_reference_r() {
    let file = pairs_file(CORRELATED);
    let report = execute(file.path(), &seeded(200, 1)).unwrap();
    assert_eq!(report.items, 5);
    assert_eq!(report.randomizations, 200);
    assert!((report.result.r - EXPECTED_R).abs() < 1e-9);
    assert!(report.result.sd > 0.0);
}

#[test]
fn execute_is_reproducible_with_seed() {
    let file = pairs_file(CORRELATED);
    let a = execute(file.path(), &seeded(100, 1)).unwrap();
    let b = execute(file.path(), &seeded(100, 1)).unwrap();
    assert_eq!(a, b);

    let pa = execute(file.path(), &seeded(100, 3)).unwrap();
    let pb = execute(file.path(), &seeded(100, 3)).unwrap();
    assert_eq!(pa, pb);
}

#[test]
fn execute_surfaces_error_kinds() {
    let malformed = pairs_file("cat,feline\ndog\n");
    let err = execute(malformed.path(), &seeded(10, 1)).unwrap_err();
    let kind = err.downcast_ref::<MantelError>().map(MantelError::kind);
    assert_eq!(kind, Some(ErrorKind::MalformedInput));

    let single = pairs_file("cat,feline\n");
    let err = execute(single.path(), &seeded(10, 1)).unwrap_err();
    let kind = err.downcast_ref::<MantelError>().map(MantelError::kind);
    assert_eq!(kind, Some(ErrorKind::InvalidInput));

    // Every pair of these strings is one substitution apart.
    let flat = pairs_file("cat,feline\nbat,flying mammal\nrat,rodent\nhat,headwear\n");
    let err = execute(flat.path(), &seeded(100, 1)).unwrap_err();
    let kind = err.downcast_ref::<MantelError>().map(MantelError::kind);
    assert_eq!(kind, Some(ErrorKind::DegenerateInput));

    let file = pairs_file(CORRELATED);
    let err = execute(file.path(), &seeded(1, 1)).unwrap_err();
    let kind = err.downcast_ref::<MantelError>().map(MantelError::kind);
    assert_eq!(kind, Some(ErrorKind::InvalidInput));
}

#[test]
fn binary_prints_four_numbers() {
    let file = pairs_file(CORRELATED);
    let output = mantel()
        .args(["-r", "100", "--seed", "5"])
        .arg(file.path())
        .output()
        .expect("run mantel");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let numbers: Vec<f64> = stdout
        .split_whitespace()
        .map(|s| s.parse().expect("numeric field"))
        .collect();
    assert_eq!(numbers.len(), 4);
    assert!((numbers[0] - EXPECTED_R).abs() < 1e-9);
}

#[test]
fn binary_json_uses_config_file() {
    let file = pairs_file(CORRELATED);
    let config = pairs_file("randomizations: 50\nseed: 11\nformat: json\n");
    let output = mantel()
        .arg("--config")
        .arg(config.path())
        .arg(file.path())
        .output()
        .expect("run mantel");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["items"], 5);
    assert_eq!(json["randomizations"], 50);
    assert_eq!(json["seed"], 11);
    assert!((json["r"].as_f64().unwrap() - EXPECTED_R).abs() < 1e-9);
}

#[test]
fn binary_fails_without_partial_output() {
    let file = pairs_file("cat,feline\ndog\n");
    let output = mantel().arg(file.path()).output().expect("run mantel");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed input"), "stderr: {stderr}");
}

#[test]
fn binary_fails_on_missing_file() {
    let output = mantel()
        .arg("/nonexistent/pairs.csv")
        .output()
        .expect("run mantel");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
