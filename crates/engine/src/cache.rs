// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-flight job records, keyed by run.

use jl_core::{JobRecord, RunId};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Holds the partial record of each running job between its start event and
/// its completion event.
///
/// Shared by every job execution on the host, so all operations take `&self`
/// and synchronize internally. Nothing is persisted: a restart forgets all
/// in-flight runs.
#[derive(Debug, Default)]
pub struct RunCorrelationCache {
    entries: Mutex<HashMap<RunId, JobRecord>>,
}

impl RunCorrelationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for `run_id`.
    pub fn put(&self, run_id: RunId, record: JobRecord) {
        self.entries.lock().insert(run_id, record);
    }

    pub fn get(&self, run_id: &RunId) -> Option<JobRecord> {
        self.entries.lock().get(run_id).cloned()
    }

    /// Remove the record for `run_id`. Absent runs are ignored.
    pub fn remove(&self, run_id: &RunId) -> Option<JobRecord> {
        self.entries.lock().remove(run_id)
    }

    /// Drop every in-flight record, returning how many were discarded.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.lock();
        let discarded = entries.len();
        entries.clear();
        discarded
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
