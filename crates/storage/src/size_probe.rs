// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File size queries used to decide when the log rotates.

use jl_core::LogFault;
use std::path::Path;

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Convert a byte count to (unrounded) megabytes.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Reports how large a log file is.
pub trait SizeProbe: Send + Sync {
    /// Size of the file at `path` in megabytes.
    ///
    /// A missing `path` is a caller bug and fails with
    /// [`LogFault::InvalidArgument`]. A path naming no file reports `0.0`.
    fn size_in_mb(&self, path: Option<&Path>) -> Result<f64, LogFault>;

    /// True only if the file exists and is strictly larger than `limit_mb`.
    fn exceeds_limit(&self, path: &Path, limit_mb: f64) -> bool;
}

/// Size probe backed by filesystem metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSizeProbe;

impl SizeProbe for FsSizeProbe {
    fn size_in_mb(&self, path: Option<&Path>) -> Result<f64, LogFault> {
        let path = path.ok_or(LogFault::InvalidArgument("size query requires a file path"))?;
        match std::fs::metadata(path) {
            Ok(meta) => Ok(bytes_to_mb(meta.len())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0.0),
            Err(e) => Err(LogFault::io(path, e)),
        }
    }

    fn exceeds_limit(&self, path: &Path, limit_mb: f64) -> bool {
        if !path.is_file() {
            return false;
        }
        match self.size_in_mb(Some(path)) {
            Ok(size_mb) if size_mb > limit_mb => {
                tracing::debug!(path = %path.display(), size_mb, limit_mb, "log file exceeds max size");
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read log file size");
                false
            }
        }
    }
}

/// Size probe with a switchable answer, for exercising rotation in tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct FixedSizeProbe {
    exceeds: std::sync::atomic::AtomicBool,
}

#[cfg(any(test, feature = "test-support"))]
impl FixedSizeProbe {
    pub fn new(exceeds: bool) -> Self {
        Self { exceeds: std::sync::atomic::AtomicBool::new(exceeds) }
    }

    pub fn set_exceeds(&self, exceeds: bool) {
        self.exceeds.store(exceeds, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "test-support"))]
impl SizeProbe for FixedSizeProbe {
    fn size_in_mb(&self, path: Option<&Path>) -> Result<f64, LogFault> {
        FsSizeProbe.size_in_mb(path)
    }

    fn exceeds_limit(&self, path: &Path, _limit_mb: f64) -> bool {
        path.is_file() && self.exceeds.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "size_probe_tests.rs"]
mod tests;
