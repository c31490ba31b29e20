// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, event loop, shutdown.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use jl_core::{LogFault, SystemClock};
use jl_engine::{ConfigError, JobRunListener, LoggerConfig, RunCorrelationCache};
use jl_storage::{FsSizeProbe, RotatingLogWriter};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info, warn};

use crate::env;
use crate::protocol;

/// Listener with the production probe and clock
pub type DaemonListener = JobRunListener<FsSizeProbe, SystemClock>;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory (e.g. ~/.local/state/joblog)
    pub base_dir: PathBuf,
    /// Path to the logger settings file
    pub config_path: PathBuf,
    /// Path to the daemon's own log
    pub daemon_log_path: PathBuf,
    /// Path to the CSV job log
    pub job_log_path: PathBuf,
}

impl Config {
    /// Resolve paths from the environment.
    pub fn load() -> Result<Self, LifecycleError> {
        let base_dir = env::base_dir()?;
        Ok(Self::for_base_dir(base_dir, env::config_path()))
    }

    pub fn for_base_dir(base_dir: PathBuf, config_path: Option<PathBuf>) -> Self {
        Self {
            config_path: config_path.unwrap_or_else(|| base_dir.join("config.toml")),
            daemon_log_path: base_dir.join("daemon.log"),
            job_log_path: LoggerConfig::log_file_in(&base_dir.join("userContent")),
            base_dir,
        }
    }
}

/// Daemon state during operation.
pub struct DaemonState {
    pub config: Config,
    pub listener: Arc<DaemonListener>,
    /// When daemon started
    pub start_time: Instant,
}

/// Counters reported when the event loop ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub events: usize,
    pub malformed: usize,
}

/// Build the cache, writer and listener.
pub fn startup(config: Config, enabled_override: Option<bool>) -> Result<DaemonState, LifecycleError> {
    let mut settings = LoggerConfig::load(&config.config_path)?;
    if let Some(enabled) = enabled_override {
        settings.log_enabled = enabled;
    }

    let writer = Arc::new(RotatingLogWriter::new(
        FsSizeProbe,
        SystemClock,
        settings.max_log_file_size_mb,
    ));
    info!(
        base_dir = %config.base_dir.display(),
        job_log = %config.job_log_path.display(),
        log_enabled = settings.log_enabled,
        max_log_file_size_mb = settings.max_log_file_size_mb,
        "starting job logger"
    );
    let listener = JobRunListener::new(
        settings,
        Arc::new(RunCorrelationCache::new()),
        writer,
        Some(config.job_log_path.clone()),
        SystemClock,
    );

    Ok(DaemonState { config, listener: Arc::new(listener), start_time: Instant::now() })
}

impl DaemonState {
    /// Handle events from `input` in arrival order until EOF or `shutdown`
    /// resolves.
    ///
    /// Lines that are not valid UTF-8 or not a valid event are counted as
    /// malformed and skipped. File I/O runs on the blocking pool. A
    /// programming-error fault stops the loop; every other fault has already
    /// been logged by the listener.
    pub async fn run<R, S>(&self, mut input: R, shutdown: S) -> Result<RunStats, LifecycleError>
    where
        R: AsyncBufRead + Unpin,
        S: Future<Output = ()>,
    {
        let mut buf = Vec::new();
        let mut stats = RunStats::default();
        tokio::pin!(shutdown);

        loop {
            buf.clear();
            let read = tokio::select! {
                read = input.read_until(b'\n', &mut buf) => read?,
                () = &mut shutdown => {
                    info!("shutdown requested");
                    break;
                }
            };
            if read == 0 {
                break;
            }

            let event = match protocol::parse_bytes(&buf) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    warn!(error = %e, "skipping malformed event");
                    stats.malformed += 1;
                    continue;
                }
            };

            debug!(event = event.name(), run_id = ?event.run_id(), "handling event");
            stats.events += 1;
            let listener = Arc::clone(&self.listener);
            let handled = tokio::task::spawn_blocking(move || listener.handle(event))
                .await
                .map_err(|e| LifecycleError::Runtime(e.to_string()))?;
            if let Err(fault) = handled {
                error!(error = %fault, "aborting on programming error");
                return Err(LifecycleError::Fault(fault));
            }
        }

        Ok(stats)
    }

    /// Tear down: in-flight runs are forgotten, never written.
    pub fn shutdown(&self) {
        let discarded = self.listener.cache().clear();
        info!(
            discarded,
            job_log = %self.config.job_log_path.display(),
            uptime_secs = self.start_time.elapsed().as_secs(),
            "job logger shutdown complete"
        );
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to set up logging: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fault: {0}")]
    Fault(LogFault),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
