// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observed job executions.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Final status of a job execution, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobResult {
    Success,
    Unstable,
    Failure,
    NotBuilt,
    Aborted,
}

crate::simple_display! {
    JobResult {
        Success => "SUCCESS",
        Unstable => "UNSTABLE",
        Failure => "FAILURE",
        NotBuilt => "NOT_BUILT",
        Aborted => "ABORTED",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown job result: {0:?}")]
pub struct ParseJobResultError(pub String);

impl FromStr for JobResult {
    type Err = ParseJobResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "SUCCESS" => Ok(Self::Success),
            "UNSTABLE" => Ok(Self::Unstable),
            "FAILURE" => Ok(Self::Failure),
            "NOT_BUILT" => Ok(Self::NotBuilt),
            "ABORTED" => Ok(Self::Aborted),
            _ => Err(ParseJobResultError(s.to_string())),
        }
    }
}

/// Render a timestamp the way it appears in log lines: `2018-03-12T15:55:42Z`.
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// One observed job execution.
///
/// A record starts out *partial*: `end_time`, `result` and `node_names` are
/// `None` until the completion event arrives. [`JobRecord::finalize`] consumes
/// the partial record and fills all three in one step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_name: String,
    /// Build number assigned by the host, increasing per job name.
    pub job_number: u64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub result: Option<JobResult>,
    /// Free-text description of what triggered the run; may be empty.
    pub cause: String,
    /// Nodes the run executed on. `Some(vec![])` means "looked, found none".
    pub node_names: Option<Vec<String>>,
    pub console_url: String,
}

crate::builder! {
    pub struct JobRecordBuilder => JobRecord {
        into {
            job_name: String = "",
            cause: String = "",
            console_url: String = "",
        }
        set {
            job_number: u64 = 0,
        }
        option {
            start_time: DateTime<Utc> = None,
            end_time: DateTime<Utc> = None,
            result: JobResult = None,
            node_names: Vec<String> = None,
        }
    }
}

impl JobRecord {
    /// Create the partial record captured when a job starts.
    pub fn started(
        job_name: impl Into<String>,
        job_number: u64,
        start_time: Option<DateTime<Utc>>,
        cause: impl Into<String>,
        console_url: impl Into<String>,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            job_number,
            start_time,
            end_time: None,
            result: None,
            cause: cause.into(),
            node_names: None,
            console_url: console_url.into(),
        }
    }

    /// Complete the record with the data only known once the job has ended.
    pub fn finalize(
        mut self,
        end_time: DateTime<Utc>,
        result: JobResult,
        node_names: Vec<String>,
    ) -> Self {
        self.end_time = Some(end_time);
        self.result = Some(result);
        self.node_names = Some(node_names);
        self
    }
}

struct Maybe<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for Maybe<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("-"),
        }
    }
}

impl fmt::Display for JobRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start_time.as_ref().map(format_timestamp);
        let end = self.end_time.as_ref().map(format_timestamp);
        let nodes = self.node_names.as_ref().map(|n| n.join(", "));
        write!(
            f,
            "[{}#{}, result: {}, start date: {}, end date: {}, cause: {}, node(s): {}, console URL: {}]",
            self.job_name,
            self.job_number,
            Maybe(&self.result),
            Maybe(&start),
            Maybe(&end),
            self.cause,
            Maybe(&nodes),
            self.console_url,
        )
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
