// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archive file naming.
//!
//! A rotated log `<dir>/job_logger.csv` is archived as
//! `<dir>/job_logger_2018-03-06_14-55-55.csv`.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub const ARCHIVE_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Archive path for `log_path` rotated at `at`.
///
/// The stamp is the UTC time of rotation, not the host's local time.
pub fn archive_path(log_path: &Path, at: DateTime<Utc>) -> PathBuf {
    let stamp = at.format(ARCHIVE_TIME_FORMAT).to_string();
    with_stem_suffix(log_path, &stamp)
}

/// Like [`archive_path`], but never names an existing file.
///
/// Rotations within the same second get `_1`, `_2`, ... appended to the
/// timestamp so earlier archives are never overwritten.
pub fn unused_archive_path(log_path: &Path, at: DateTime<Utc>) -> PathBuf {
    let base = archive_path(log_path, at);
    if !base.exists() {
        return base;
    }
    let stamp = at.format(ARCHIVE_TIME_FORMAT).to_string();
    let mut n: u32 = 1;
    loop {
        let candidate = with_stem_suffix(log_path, &format!("{stamp}_{n}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

fn with_stem_suffix(log_path: &Path, suffix: &str) -> PathBuf {
    let stem = log_path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let name = match log_path.extension() {
        Some(ext) => format!("{stem}_{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{suffix}"),
    };
    log_path.with_file_name(name)
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
