//! Result list loading
//!
//! Reads the backend's JSON result list (an array, or one record per line)
//! from a file or stdin and validates each record before it reaches the store.

use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::core::error::LoadError;
use crate::core::model::ResultRecord;

/// Encoding of the input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// JSON array of records, or JSON Lines
    #[default]
    Records,
    /// `rg --json` event stream
    Rg,
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "records" | "json" | "jsonl" => Ok(InputFormat::Records),
            "rg" | "ripgrep" => Ok(InputFormat::Rg),
            _ => Err(format!("Unknown input format: {}", s)),
        }
    }
}

/// Read all input text; `-` means stdin
pub fn read_input(path: &Path) -> Result<String, LoadError> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Decode and validate a result list in the given format
pub fn parse_input(text: &str, format: InputFormat) -> Result<Vec<ResultRecord>, LoadError> {
    let records = match format {
        InputFormat::Records => parse_records(text)?,
        InputFormat::Rg => crate::backends::rg::parse_rg_json(text)?,
    };
    for record in &records {
        record.validate()?;
    }
    debug!(count = records.len(), ?format, "input decoded");
    Ok(records)
}

/// Load a result list from a file (or stdin for `-`)
pub fn load(path: &Path, format: InputFormat) -> Result<Vec<ResultRecord>, LoadError> {
    let text = read_input(path)?;
    parse_input(&text, format)
}

/// Parse a JSON array or JSON Lines
pub fn parse_records(text: &str) -> Result<Vec<ResultRecord>, LoadError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(text).map_err(|source| LoadError::Json {
            line: source.line(),
            source,
        });
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| LoadError::Json {
                line: index + 1,
                source,
            })
        })
        .collect()
}
