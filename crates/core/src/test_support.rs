// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{JobEvent, JobRecord, JobResult, RunId};
use chrono::{DateTime, TimeZone, Utc};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for the record model.
pub mod strategies {
    use crate::{JobRecord, JobResult, RunId};
    use proptest::prelude::*;

    pub fn arb_job_result() -> impl Strategy<Value = JobResult> {
        prop_oneof![
            Just(JobResult::Success),
            Just(JobResult::Unstable),
            Just(JobResult::Failure),
            Just(JobResult::NotBuilt),
            Just(JobResult::Aborted),
        ]
    }

    pub fn arb_run_id() -> impl Strategy<Value = RunId> {
        "[a-z][a-z0-9-]{0,12}#[0-9]{1,4}".prop_map(RunId::new)
    }

    pub fn arb_partial_record() -> impl Strategy<Value = JobRecord> {
        ("[a-zA-Z0-9_-]{0,16}", any::<u64>(), "[ -~]{0,24}").prop_map(
            |(name, number, cause)| JobRecord::started(name, number, None, cause, ""),
        )
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

/// Fixed timestamp on 2018-03-12 for deterministic output.
pub fn ts(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 3, 12, h, m, s).single().unwrap_or_default()
}

/// A finalized record with every field populated.
pub fn finalized_record(name: &str, number: u64, nodes: &[&str]) -> JobRecord {
    JobRecord::builder()
        .job_name(name)
        .job_number(number)
        .result(JobResult::Success)
        .start_time(ts(16, 55, 42))
        .end_time(ts(17, 42, 55))
        .cause(format!("{name} cause"))
        .node_names(nodes.iter().map(|n| n.to_string()).collect::<Vec<_>>())
        .console_url(format!("http://ci/job/{name}/{number}/console"))
        .build()
}

// ── Event factory functions ─────────────────────────────────────────────

pub fn started_event(run_id: &str, job_name: &str, job_number: u64) -> JobEvent {
    JobEvent::Started {
        run_id: RunId::new(run_id),
        job_name: job_name.to_string(),
        job_number,
        start_time: Some(ts(9, 0, 0)),
        cause: "Started by timer".to_string(),
        console_url: format!("http://ci/job/{job_name}/{job_number}/console"),
    }
}

pub fn completed_event(run_id: &str, result: JobResult, nodes: &[&str]) -> JobEvent {
    JobEvent::Completed {
        run_id: RunId::new(run_id),
        result,
        end_time: Some(ts(9, 30, 0)),
        node_names: nodes.iter().map(|n| n.to_string()).collect(),
        console_log: None,
    }
}
