// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle events delivered by the host

use crate::id::RunId;
use crate::record::JobResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Events that drive the job logger.
///
/// Serializes with `{"type": "job:started", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JobEvent {
    #[serde(rename = "job:started")]
    Started {
        run_id: RunId,
        job_name: String,
        job_number: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_time: Option<DateTime<Utc>>,
        #[serde(default)]
        cause: String,
        #[serde(default)]
        console_url: String,
    },

    #[serde(rename = "job:completed")]
    Completed {
        run_id: RunId,
        result: JobResult,
        /// Defaults to the time the event is processed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_time: Option<DateTime<Utc>>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        node_names: Vec<String>,
        /// Console log to scan for node names when `node_names` is empty.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        console_log: Option<PathBuf>,
    },

    #[serde(rename = "config:changed")]
    ConfigChanged {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        log_enabled: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_log_file_size_mb: Option<f64>,
    },
}

impl JobEvent {
    pub fn name(&self) -> &'static str {
        match self {
            JobEvent::Started { .. } => "job:started",
            JobEvent::Completed { .. } => "job:completed",
            JobEvent::ConfigChanged { .. } => "config:changed",
        }
    }

    pub fn run_id(&self) -> Option<&RunId> {
        match self {
            JobEvent::Started { run_id, .. } | JobEvent::Completed { run_id, .. } => Some(run_id),
            JobEvent::ConfigChanged { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
