// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only CSV job log with size-based rotation.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jl_core::{Clock, JobRecord, LogFault};
use parking_lot::{Mutex, RwLock};

use crate::archive;
use crate::format;
use crate::size_probe::SizeProbe;

pub const DEFAULT_MAX_SIZE_MB: f64 = 1.0;

/// What a successful [`RotatingLogWriter::append`] did besides appending.
#[derive(Debug, Default)]
pub struct Appended {
    /// A fresh file was started with the header line.
    pub header_written: bool,
    /// Where the previous file was archived, if it was rotated.
    pub archived: Option<PathBuf>,
    /// Rotation was attempted but failed; the record went to the unrotated file.
    pub rotation_fault: Option<LogFault>,
}

/// Appends finalized job records to a CSV log, archiving the file once it
/// grows past the configured size.
///
/// Every `append()` for a given path runs under that path's mutex: the size
/// check, rotation, header write and record append happen as one unit, so
/// concurrent callers never both rotate or both write a header. The writer
/// assumes it is the only process touching the file.
pub struct RotatingLogWriter<P: SizeProbe, C: Clock> {
    probe: P,
    clock: C,
    max_size_mb: RwLock<f64>,
    path_locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl<P: SizeProbe, C: Clock> RotatingLogWriter<P, C> {
    pub fn new(probe: P, clock: C, max_size_mb: f64) -> Self {
        Self {
            probe,
            clock,
            max_size_mb: RwLock::new(max_size_mb),
            path_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn max_size_mb(&self) -> f64 {
        *self.max_size_mb.read()
    }

    /// Change the rotation threshold. Takes effect on the next append.
    pub fn set_max_size_mb(&self, max_size_mb: f64) {
        *self.max_size_mb.write() = max_size_mb;
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Append one record line to the log at `path`.
    ///
    /// An unset path is a configuration fault and nothing is written. A
    /// failed rotation is not fatal: the record is still appended to the
    /// original file and the fault is returned in [`Appended::rotation_fault`].
    pub fn append(&self, path: Option<&Path>, record: &JobRecord) -> Result<Appended, LogFault> {
        let Some(path) = path else {
            return Err(LogFault::Config("log file path is not set".to_string()));
        };

        let lock = self.path_lock(path);
        let _guard = lock.lock();

        let mut appended = Appended::default();

        if path.exists() && self.probe.exceeds_limit(path, self.max_size_mb()) {
            tracing::debug!(path = %path.display(), "log file exceeds max size, archiving");
            match self.rotate(path) {
                Ok(archive) => appended.archived = Some(archive),
                Err(fault) => appended.rotation_fault = Some(fault),
            }
        }

        if !path.exists() {
            tracing::debug!(path = %path.display(), "creating new log file");
            self.write_header(path).map_err(|e| LogFault::io(path, e))?;
            appended.header_written = true;
        }

        append_line(path, &format::record_line(record)).map_err(|e| LogFault::io(path, e))?;
        tracing::debug!(path = %path.display(), "updated log file");
        Ok(appended)
    }

    fn path_lock(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.path_locks.lock();
        Arc::clone(locks.entry(path.to_path_buf()).or_default())
    }

    /// Copy the log to a timestamped archive, then delete the original.
    ///
    /// A failed copy leaves the original untouched.
    fn rotate(&self, path: &Path) -> Result<PathBuf, LogFault> {
        let archive = archive::unused_archive_path(path, self.clock.wall_time());
        fs::copy(path, &archive).map_err(|e| LogFault::io(&archive, e))?;
        fs::remove_file(path).map_err(|e| LogFault::io(path, e))?;
        tracing::info!(archive = %archive.display(), "log file archived");
        Ok(archive)
    }

    fn write_header(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        append_line(path, &format::header_line())
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
