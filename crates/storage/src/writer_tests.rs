// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::size_probe::{FixedSizeProbe, FsSizeProbe};
use chrono::{TimeZone, Utc};
use jl_core::test_support::{finalized_record, ts};
use jl_core::{FakeClock, JobResult};
use tempfile::TempDir;

const HEADER: &str = "JobName;JobNumber;Result;StartDate;EndDate;Cause;Node;ConsoleUrl";

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path).unwrap().lines().map(str::to_string).collect()
}

fn rotation_clock() -> FakeClock {
    let clock = FakeClock::new();
    clock.set_wall_time(Utc.with_ymd_and_hms(2018, 3, 6, 14, 55, 55).unwrap());
    clock
}

fn writer(exceeds: bool) -> RotatingLogWriter<FixedSizeProbe, FakeClock> {
    RotatingLogWriter::new(FixedSizeProbe::new(exceeds), rotation_clock(), DEFAULT_MAX_SIZE_MB)
}

fn record(name: &str, number: u64, result: JobResult, node: &str) -> JobRecord {
    JobRecord::builder()
        .job_name(name)
        .job_number(number)
        .result(result)
        .start_time(ts(16, 55, 42))
        .end_time(ts(17, 42, 55))
        .cause(format!("{name} cause"))
        .node_names(vec![node.to_string()])
        .console_url(format!("{name} url"))
        .build()
}

#[test]
fn unset_path_is_config_fault() {
    let err = writer(false).append(None, &JobRecord::default()).unwrap_err();
    assert!(matches!(err, LogFault::Config(_)));
}

#[test]
fn append_to_new_file_writes_header_then_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.log");

    let appended = writer(false).append(Some(&path), &JobRecord::default()).unwrap();

    assert!(appended.header_written);
    assert!(appended.archived.is_none());
    assert_eq!(read_lines(&path), vec![HEADER.to_string(), ";0;;;;;;".to_string()]);
}

#[test]
fn append_full_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.log");
    let record = JobRecord::builder()
        .job_name("testJob")
        .job_number(42)
        .result(JobResult::Success)
        .start_time(ts(16, 55, 42))
        .end_time(ts(17, 42, 55))
        .cause("testCause")
        .node_names(vec!["node 1".to_string(), "node 2".to_string()])
        .console_url("testUrl")
        .build();

    writer(false).append(Some(&path), &record).unwrap();

    assert_eq!(
        read_lines(&path)[1],
        "testJob;42;SUCCESS;2018-03-12T16:55:42Z;2018-03-12T17:42:55Z;testCause;[node 1, node 2];testUrl"
    );
}

#[test]
fn appends_below_limit_never_rotate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.log");
    let writer = writer(false);

    let first = writer.append(Some(&path), &record("testJob", 42, JobResult::Success, "a")).unwrap();
    let second =
        writer.append(Some(&path), &record("testJob2", 88, JobResult::Failure, "b")).unwrap();

    assert!(first.header_written);
    assert!(!second.header_written);
    assert!(second.archived.is_none());
    let lines = read_lines(&path);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].starts_with("testJob;42;SUCCESS;"));
    assert!(lines[2].starts_with("testJob2;88;FAILURE;"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn exceeding_limit_archives_old_lines_and_starts_fresh_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job_logger.csv");
    let first = format::record_line(&record("testJob", 42, JobResult::Success, "node 1"));
    let second = format::record_line(&record("testJob2", 88, JobResult::Failure, "node 3"));
    fs::write(&path, format!("{}{first}{second}", format::header_line())).unwrap();

    let writer = writer(true);
    let archive = dir.path().join("job_logger_2018-03-06_14-55-55.csv");
    assert!(!archive.exists());

    let third = record("testJob3", 55, JobResult::Success, "node 4");
    let appended = writer.append(Some(&path), &third).unwrap();

    assert_eq!(appended.archived.as_deref(), Some(archive.as_path()));
    assert!(appended.header_written);
    assert!(appended.rotation_fault.is_none());
    assert_eq!(
        read_lines(&archive),
        vec![HEADER.to_string(), first.trim_end().to_string(), second.trim_end().to_string()]
    );
    assert_eq!(
        read_lines(&path),
        vec![HEADER.to_string(), format::record_line(&third).trim_end().to_string()]
    );
}

#[test]
fn rotations_in_same_second_keep_earlier_archives() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job_logger.csv");
    let writer = writer(false);

    writer.append(Some(&path), &record("one", 1, JobResult::Success, "a")).unwrap();
    writer.probe().set_exceeds(true);
    let r1 = writer.append(Some(&path), &record("two", 2, JobResult::Success, "a")).unwrap();
    let r2 = writer.append(Some(&path), &record("three", 3, JobResult::Success, "a")).unwrap();

    assert_eq!(r1.archived, Some(dir.path().join("job_logger_2018-03-06_14-55-55.csv")));
    assert_eq!(r2.archived, Some(dir.path().join("job_logger_2018-03-06_14-55-55_1.csv")));
    assert!(read_lines(r1.archived.as_deref().unwrap())[1].starts_with("one;1;"));
    assert!(read_lines(r2.archived.as_deref().unwrap())[1].starts_with("two;2;"));
    assert!(read_lines(&path)[1].starts_with("three;3;"));
}

#[cfg(unix)]
#[test]
fn failed_archive_copy_keeps_original_and_still_appends() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job_logger.csv");
    fs::write(&path, format!("{}old;1;;;;;;\n", format::header_line())).unwrap();

    // A dangling symlink at the archive name makes the copy fail.
    let archive = dir.path().join("job_logger_2018-03-06_14-55-55.csv");
    std::os::unix::fs::symlink(dir.path().join("missing/dir/target"), &archive).unwrap();

    let appended = writer(true).append(Some(&path), &JobRecord::default()).unwrap();

    assert!(matches!(appended.rotation_fault, Some(LogFault::Io { .. })));
    assert!(appended.archived.is_none());
    assert!(!appended.header_written);
    assert_eq!(
        read_lines(&path),
        vec![HEADER.to_string(), "old;1;;;;;;".to_string(), ";0;;;;;;".to_string()]
    );
}

#[test]
fn header_write_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("userContent").join("job_logger.csv");

    writer(false).append(Some(&path), &finalized_record("build", 1, &[])).unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].ends_with(";[];http://ci/job/build/1/console"));
}

#[test]
fn append_into_directory_path_is_io_fault() {
    let dir = TempDir::new().unwrap();
    let err = writer(false).append(Some(dir.path()), &JobRecord::default()).unwrap_err();
    assert!(matches!(err, LogFault::Io { .. }));
}

#[test]
fn max_size_can_be_changed() {
    let writer = writer(false);
    assert_eq!(writer.max_size_mb(), DEFAULT_MAX_SIZE_MB);
    writer.set_max_size_mb(2.5);
    assert_eq!(writer.max_size_mb(), 2.5);
}

#[test]
fn concurrent_appends_write_one_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job_logger.csv");
    let writer = writer(false);

    std::thread::scope(|s| {
        for t in 0..8u64 {
            let writer = &writer;
            let path = &path;
            s.spawn(move || {
                for i in 0..25u64 {
                    let rec = record(&format!("job{t}"), i, JobResult::Success, "n");
                    writer.append(Some(path), &rec).unwrap();
                }
            });
        }
    });

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1 + 8 * 25);
    assert_eq!(lines.iter().filter(|l| l.as_str() == HEADER).count(), 1);
    assert_eq!(lines[0], HEADER);
}

#[test]
fn concurrent_appends_with_rotation_lose_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job_logger.csv");
    // ~1 KiB per file
    let writer = RotatingLogWriter::new(FsSizeProbe, rotation_clock(), 0.001);

    std::thread::scope(|s| {
        for t in 0..4u64 {
            let writer = &writer;
            let path = &path;
            s.spawn(move || {
                for i in 0..50u64 {
                    let rec = record(&format!("job{t}"), i, JobResult::Success, "n");
                    writer.append(Some(path), &rec).unwrap();
                }
            });
        }
    });

    let mut data_lines = 0;
    let mut files = 0;
    for entry in fs::read_dir(dir.path()).unwrap() {
        let lines = read_lines(&entry.unwrap().path());
        files += 1;
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines.iter().filter(|l| l.as_str() == HEADER).count(), 1);
        data_lines += lines.len() - 1;
    }
    assert!(files > 1, "expected at least one rotation");
    assert_eq!(data_lines, 4 * 50);
}
