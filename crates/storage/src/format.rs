// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line format of the job log.
//!
//! ```text
//! JobName;JobNumber;Result;StartDate;EndDate;Cause;Node;ConsoleUrl
//! build;42;SUCCESS;2018-03-12T16:55:42Z;2018-03-12T17:42:55Z;Started by timer;[linux-1];http://ci/job/build/42/console
//! ```
//!
//! Absent values render as empty fields. The node list renders as
//! `[a, b]`, or `[]` when the run reported no nodes.

use jl_core::{format_timestamp, JobRecord};

pub const SEPARATOR: char = ';';

pub const COLUMNS: [&str; 8] =
    ["JobName", "JobNumber", "Result", "StartDate", "EndDate", "Cause", "Node", "ConsoleUrl"];

/// The header line, newline-terminated.
pub fn header_line() -> String {
    let mut line = COLUMNS.join(&SEPARATOR.to_string());
    line.push('\n');
    line
}

/// One record as a newline-terminated log line.
pub fn record_line(record: &JobRecord) -> String {
    let fields = [
        record.job_name.clone(),
        record.job_number.to_string(),
        record.result.map(|r| r.to_string()).unwrap_or_default(),
        record.start_time.as_ref().map(format_timestamp).unwrap_or_default(),
        record.end_time.as_ref().map(format_timestamp).unwrap_or_default(),
        record.cause.clone(),
        record.node_names.as_deref().map(node_list).unwrap_or_default(),
        record.console_url.clone(),
    ];

    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(SEPARATOR);
        }
        push_single_line(&mut line, field);
    }
    line.push('\n');
    line
}

fn node_list(nodes: &[String]) -> String {
    format!("[{}]", nodes.join(", "))
}

// A record must occupy exactly one line.
fn push_single_line(line: &mut String, field: &str) {
    line.extend(field.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
