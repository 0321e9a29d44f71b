//! ripgrep output decoding
//!
//! Converts an `rg --json` event stream into result records, one record per
//! submatch. Only `match` events are used; other events are skipped.

use serde_json::Value;
use tracing::warn;

use crate::core::error::LoadError;
use crate::core::model::ResultRecord;

/// Parse `rg --json` output
pub fn parse_rg_json(text: &str) -> Result<Vec<ResultRecord>, LoadError> {
    let mut records = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let v: Value = serde_json::from_str(line).map_err(|source| LoadError::Json {
            line: index + 1,
            source,
        })?;

        if v.get("type").and_then(|t| t.as_str()) != Some("match") {
            continue;
        }

        let data = match v.get("data") {
            Some(d) => d,
            None => continue,
        };

        let path_text = match data.get("path").and_then(text_field) {
            Some(p) => p,
            None => {
                warn!(line = index + 1, "match event without a text path, skipped");
                continue;
            }
        };
        let path = path_text.strip_prefix("./").unwrap_or(path_text).to_string();

        let lines_text = match data.get("lines").and_then(text_field) {
            Some(t) => t,
            None => {
                warn!(
                    line = index + 1,
                    path = %path,
                    "match event without text lines, skipped"
                );
                continue;
            }
        };
        let (first_line, multiline) = match lines_text.split_once('\n') {
            Some((first, rest)) => (first, !rest.is_empty()),
            None => (lines_text, false),
        };
        let content = first_line.trim_end_matches('\r').to_string();
        if multiline {
            warn!(
                line = index + 1,
                path = %path,
                "multi-line match, keeping the first line"
            );
        }

        let line_num = data
            .get("line_number")
            .and_then(|n| n.as_u64())
            .unwrap_or(1);

        let submatches = data
            .get("submatches")
            .and_then(|s| s.as_array())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        for submatch in submatches {
            let start = submatch.get("start").and_then(|s| s.as_u64());
            let end = submatch.get("end").and_then(|e| e.as_u64());
            let (start, end) = match (start, end) {
                (Some(s), Some(e)) => (s, e),
                _ => continue,
            };
            // A match may run into the stripped line terminator
            let len = content.len() as u64;
            if start > len {
                continue;
            }
            records.push(ResultRecord::new(
                path.clone(),
                line_num,
                content.clone(),
                start.min(len),
                end.min(len),
            ));
        }
    }

    Ok(records)
}

// rg encodes values as {"text": ...} or, for non-UTF-8 data, {"bytes": ...}
fn text_field(v: &Value) -> Option<&str> {
    v.get("text").and_then(|t| t.as_str())
}
