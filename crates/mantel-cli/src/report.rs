//! # Report Rendering
//!
//! Renders a [`MantelResult`] for standard output. The text form is the
//! four numbers `r m sd z` separated by spaces; the JSON form adds the run
//! parameters.

use anyhow::Result;
use serde::Serialize;

use mantel_core::MantelResult;

use crate::config::{OutputFormat, RunConfig};

/// A finished run, as serialized by `--format json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub items: usize,
    pub randomizations: usize,
    pub workers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub result: MantelResult,
}

impl Report {
    pub fn new(items: usize, config: &RunConfig, result: MantelResult) -> Self {
        Self {
            items,
            randomizations: config.randomizations,
            workers: config.workers,
            seed: config.seed,
            result,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => {
                let MantelResult { r, mean, sd, z } = self.result;
                Ok(format!("{r} {mean} {sd} {z}"))
            }
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
