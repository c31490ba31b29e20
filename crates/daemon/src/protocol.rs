// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stdin protocol: one JSON-encoded [`JobEvent`] per line.
//!
//! Blank lines and lines starting with `#` are ignored.

use jl_core::JobEvent;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("line is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("invalid event: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse one raw input line, as read up to and including its `\n`.
pub fn parse_bytes(line: &[u8]) -> Result<Option<JobEvent>, ProtocolError> {
    let line = std::str::from_utf8(line)?;
    Ok(parse_line(line)?)
}

pub fn parse_line(line: &str) -> Result<Option<JobEvent>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
