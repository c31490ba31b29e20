// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs::File;
use tempfile::TempDir;

fn file_of_len(dir: &TempDir, name: &str, len: u64) -> std::path::PathBuf {
    let path = dir.path().join(name);
    File::create(&path).unwrap().set_len(len).unwrap();
    path
}

#[test]
fn size_in_mb_rejects_missing_path() {
    let err = FsSizeProbe.size_in_mb(None).unwrap_err();
    assert!(matches!(err, LogFault::InvalidArgument(_)));
    assert!(err.is_programming_error());
}

#[yare::parameterized(
    one_mb   = { 1_048_576, 1.0 },
    two_mb   = { 2_097_152, 2.0 },
    one_kb   = { 1_024,     0.0009765625 },
    empty    = { 0,         0.0 },
)]
fn size_in_mb_is_unrounded(len: u64, expected: f64) {
    let dir = TempDir::new().unwrap();
    let path = file_of_len(&dir, "job_logger.csv", len);
    assert_eq!(FsSizeProbe.size_in_mb(Some(&path)).unwrap(), expected);
}

#[test]
fn size_in_mb_of_nonexistent_file_is_zero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.csv");
    assert_eq!(FsSizeProbe.size_in_mb(Some(&path)).unwrap(), 0.0);
}

#[test]
fn exceeds_limit_false_when_file_missing() {
    let dir = TempDir::new().unwrap();
    assert!(!FsSizeProbe.exceeds_limit(&dir.path().join("nope.csv"), 0.0));
}

#[yare::parameterized(
    exactly_at_limit = { 1_048_576, false },
    below_limit      = { 1_024,     false },
    empty_file       = { 0,         false },
    above_limit      = { 2_097_152, true },
    one_byte_over    = { 1_048_577, true },
)]
fn exceeds_limit_is_strictly_greater(len: u64, expected: bool) {
    let dir = TempDir::new().unwrap();
    let path = file_of_len(&dir, "job_logger.csv", len);
    assert_eq!(FsSizeProbe.exceeds_limit(&path, 1.0), expected);
}

#[test]
fn fixed_probe_only_exceeds_for_existing_files() {
    let dir = TempDir::new().unwrap();
    let probe = FixedSizeProbe::new(true);
    assert!(!probe.exceeds_limit(&dir.path().join("nope.csv"), 1.0));

    let path = file_of_len(&dir, "job_logger.csv", 3);
    assert!(probe.exceeds_limit(&path, 1.0));
    probe.set_exceeds(false);
    assert!(!probe.exceeds_limit(&path, 1.0));
}
