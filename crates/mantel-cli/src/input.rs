//! # Pairs Input
//!
//! Reads line-delimited `string,meaning` records into two parallel
//! sequences.
//!
//! - One record per line, split on `\n`; a trailing `\r` is stripped.
//! - Blank lines are skipped, so a trailing newline is harmless.
//! - Every other line must hold exactly two comma-separated fields.
//!   Fields are taken verbatim, including surrounding whitespace.

use std::path::Path;

use anyhow::{Context, Result};
use mantel_core::MantelError;

/// Two entry-aligned columns read from a pairs file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pairs {
    pub strings: Vec<String>,
    pub meanings: Vec<String>,
}

impl Pairs {
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Parse pairs from file contents.
///
/// Fails with `MalformedInput` naming the 1-based line number of the first
/// record without exactly two fields.
pub fn parse_pairs(content: &str) -> mantel_core::Result<Pairs> {
    let mut pairs = Pairs::default();
    for (idx, raw) in content.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        match fields.as_slice() {
            [string, meaning] => {
                pairs.strings.push((*string).to_string());
                pairs.meanings.push((*meaning).to_string());
            }
            _ => {
                return Err(MantelError::MalformedInput(format!(
                    "line {}: expected 2 comma-separated fields, found {}",
                    idx + 1,
                    fields.len()
                )));
            }
        }
    }
    tracing::debug!(records = pairs.len(), "parsed pairs");
    Ok(pairs)
}

/// Read and parse a pairs file.
pub fn read_pairs(path: &Path) -> Result<Pairs> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pairs file: {}", path.display()))?;
    let pairs = parse_pairs(&content)
        .with_context(|| format!("failed to parse pairs file: {}", path.display()))?;
    Ok(pairs)
}
