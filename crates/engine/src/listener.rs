// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns job lifecycle events into log lines.
//!
//! A start event parks a partial [`JobRecord`] in the correlation cache. The
//! matching completion event finalizes it, hands it to the writer and drops
//! the cache entry. Faults are logged here and never fail the job itself.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use jl_core::{Clock, JobEvent, JobRecord, JobResult, LogFault, RunId};
use jl_storage::{Appended, RotatingLogWriter, SizeProbe};
use parking_lot::RwLock;

use crate::cache::RunCorrelationCache;
use crate::config::{ConfigError, LoggerConfig};
use crate::node_names;

/// What happened to a completion event.
#[derive(Debug)]
pub enum Completion {
    /// Logging is disabled; the event was ignored.
    Skipped,
    /// The finalized record was appended.
    Logged(Appended),
}

/// Receives start and completion callbacks from concurrently running jobs.
///
/// The cache and writer are injected so one instance of each can be shared
/// for the lifetime of the process.
pub struct JobRunListener<P: SizeProbe, C: Clock> {
    config: RwLock<LoggerConfig>,
    cache: Arc<RunCorrelationCache>,
    writer: Arc<RotatingLogWriter<P, C>>,
    /// `None` when the log location could not be resolved.
    log_path: Option<PathBuf>,
    clock: C,
}

impl<P: SizeProbe, C: Clock> JobRunListener<P, C> {
    pub fn new(
        config: LoggerConfig,
        cache: Arc<RunCorrelationCache>,
        writer: Arc<RotatingLogWriter<P, C>>,
        log_path: Option<PathBuf>,
        clock: C,
    ) -> Self {
        writer.set_max_size_mb(config.max_log_file_size_mb);
        Self { config: RwLock::new(config), cache, writer, log_path, clock }
    }

    pub fn config(&self) -> LoggerConfig {
        self.config.read().clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.config.read().log_enabled
    }

    pub fn cache(&self) -> &RunCorrelationCache {
        &self.cache
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Apply new settings.
    ///
    /// Disabling clears the cache under the config lock, so a start event
    /// racing with the toggle cannot leave a stale entry behind.
    pub fn configure(&self, config: LoggerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let mut current = self.config.write();
        self.writer.set_max_size_mb(config.max_log_file_size_mb);
        if !config.log_enabled {
            let discarded = self.cache.clear();
            if discarded > 0 {
                tracing::info!(discarded, "logging disabled, discarded in-flight runs");
            }
        }
        tracing::info!(
            log_enabled = config.log_enabled,
            max_log_file_size_mb = config.max_log_file_size_mb,
            "saving configuration"
        );
        *current = config;
        Ok(())
    }

    pub fn set_enabled(&self, enabled: bool) {
        let mut config = self.config();
        config.log_enabled = enabled;
        if let Err(e) = self.configure(config) {
            tracing::warn!(error = %e, "failed to toggle logging");
        }
    }

    /// Remember the partial record of a run that just started.
    ///
    /// Returns false when logging is disabled and the event was ignored.
    pub fn on_started(&self, run_id: RunId, record: JobRecord) -> bool {
        let config = self.config.read();
        if !config.log_enabled {
            tracing::debug!(%run_id, "logging is disabled");
            return false;
        }
        tracing::debug!(%run_id, job = %record.job_name, number = record.job_number, "build started");
        self.cache.put(run_id, record);
        true
    }

    /// Finalize and write the record of a completed run.
    ///
    /// The cache entry is taken before writing, so it is gone whether or not
    /// the write succeeds and a failing log never leaves a run stuck in
    /// flight. Of several completions for one run, exactly one is written.
    pub fn on_completed(
        &self,
        run_id: &RunId,
        end_time: DateTime<Utc>,
        result: JobResult,
        node_names: Vec<String>,
    ) -> Result<Completion, LogFault> {
        if !self.is_enabled() {
            return Ok(Completion::Skipped);
        }

        // Removed before writing: a concurrent duplicate completion sees a miss.
        let Some(partial) = self.cache.remove(run_id) else {
            tracing::warn!(%run_id, "could not find run in cache, log entry not created");
            return Err(LogFault::CorrelationMiss { run_id: run_id.clone() });
        };

        let record = partial.finalize(end_time, result, node_names);
        tracing::debug!(%run_id, %record, "build completed");

        match self.writer.append(self.log_path(), &record) {
            Ok(appended) => {
                if let Some(fault) = &appended.rotation_fault {
                    tracing::warn!(error = %fault, "could not archive log file");
                }
                Ok(Completion::Logged(appended))
            }
            Err(fault) => {
                tracing::error!(%run_id, error = %fault, "failed to write job log");
                Err(fault)
            }
        }
    }

    /// Dispatch one host event.
    ///
    /// Every fault is logged and swallowed except programming errors, which
    /// are returned so the caller can escalate them. The only programming
    /// error is [`LogFault::InvalidArgument`] from a size query without a
    /// path; the writer rejects an unset path as a configuration fault before
    /// it probes, so with the bundled writer this branch does not fire.
    pub fn handle(&self, event: JobEvent) -> Result<(), LogFault> {
        match event {
            JobEvent::Started { run_id, job_name, job_number, start_time, cause, console_url } => {
                let record = JobRecord::started(job_name, job_number, start_time, cause, console_url);
                self.on_started(run_id, record);
                Ok(())
            }
            JobEvent::Completed { run_id, result, end_time, node_names, console_log } => {
                if !self.is_enabled() {
                    return Ok(());
                }
                let node_names = match console_log {
                    Some(log) if node_names.is_empty() => self.scan_console_log(&run_id, &log),
                    _ => node_names,
                };
                let end_time = end_time.unwrap_or_else(|| self.clock.wall_time());
                match self.on_completed(&run_id, end_time, result, node_names) {
                    Err(fault) if fault.is_programming_error() => Err(fault),
                    _ => Ok(()),
                }
            }
            JobEvent::ConfigChanged { log_enabled, max_log_file_size_mb } => {
                let mut config = self.config();
                if let Some(enabled) = log_enabled {
                    config.log_enabled = enabled;
                }
                if let Some(max) = max_log_file_size_mb {
                    config.max_log_file_size_mb = max;
                }
                if let Err(e) = self.configure(config) {
                    tracing::warn!(error = %e, "rejected configuration change");
                }
                Ok(())
            }
        }
    }

    fn scan_console_log(&self, run_id: &RunId, log: &Path) -> Vec<String> {
        match node_names::node_names_from_file(log) {
            Ok(nodes) => nodes,
            Err(e) => {
                tracing::warn!(
                    %run_id,
                    log = %log.display(),
                    error = %e,
                    "could not retrieve node names from console log"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
