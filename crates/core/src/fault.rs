// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Faults raised while correlating and recording job executions.
//!
//! None of these are allowed to fail a job: callers log them and move on.
//! The one exception is [`LogFault::InvalidArgument`], which signals a bug in
//! the caller and should be escalated.

use crate::id::RunId;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogFault {
    /// The log location could not be resolved.
    #[error("configuration fault: {0}")]
    Config(String),

    #[error("I/O fault on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A completion event arrived without a matching start.
    #[error("no in-flight record for run {run_id}")]
    CorrelationMiss { run_id: RunId },

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl LogFault {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        LogFault::Io { path: path.to_path_buf(), source }
    }

    /// True for faults caused by a caller bug rather than the environment.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, LogFault::InvalidArgument(_))
    }
}

#[cfg(test)]
#[path = "fault_tests.rs"]
mod tests;
