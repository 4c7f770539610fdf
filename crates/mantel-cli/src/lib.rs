//! # mantel-cli — Mantel Test Command-Line Interface
//!
//! Replaces the `MantelTest.py` script with a clap-based CLI:
//!
//! ```text
//! mantel [-v] [--config FILE] [-r N] [--seed S] [--workers W] [--format text|json] PAIRS.csv
//! ```
//!
//! ## Modules
//!
//! - `input` — reads `string,meaning` records into two columns
//! - `config` — flag / YAML file / default layering
//! - `report` — text and JSON rendering
//! - `run` — wires the above to `mantel-core`
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from computation.
//! - Handlers delegate to `mantel-core`; no statistics live here.
//! - Only the report goes to stdout; logs go to stderr.

pub mod config;
pub mod input;
pub mod report;
pub mod run;
