// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recover which nodes a run executed on from its console output.
//!
//! The host prints `Running on <node> in <workspace>` each time a run is
//! scheduled onto a node.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static RUNNING_ON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Running on )(.+)( in .+)").expect("constant regex pattern is valid")
});

/// Hidden console annotations: `ESC[8mha:<payload>ESC[0m`.
#[allow(clippy::expect_used)]
static CONSOLE_NOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[8mha:.*?\x1b\[0m").expect("constant regex pattern is valid")
});

/// Node names in the order they appear in `lines`. Empty when none match.
pub fn extract_node_names<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut nodes = Vec::new();
    for line in lines {
        let cleaned = CONSOLE_NOTE.replace_all(line, "");
        for caps in RUNNING_ON.captures_iter(&cleaned) {
            if let Some(node) = caps.get(2) {
                nodes.push(node.as_str().to_string());
            }
        }
    }
    nodes
}

/// Read a console log from disk and extract its node names.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn node_names_from_file(path: &Path) -> std::io::Result<Vec<String>> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(extract_node_names(text.lines()))
}

#[cfg(test)]
#[path = "node_names_tests.rs"]
mod tests;
