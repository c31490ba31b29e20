// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

#[yare::parameterized(
    none          = { &["Started by user admin", "Finished: SUCCESS"],            &[] },
    single        = { &["Running on linux-1 in /ws/build"],                        &["linux-1"] },
    spaced_name   = { &["Running on node 1 in /ws/a"],                             &["node 1"] },
    several_lines = { &["Running on a in /x", "noise", "Running on b in /y"],      &["a", "b"] },
    prefixed      = { &["[Pipeline] node", "12:00 Running on win-7 in C:\\ws"],     &["win-7"] },
    no_workspace  = { &["Running on orphan"],                                      &[] },
)]
fn extracts_nodes_in_order(lines: &[&str], expected: &[&str]) {
    assert_eq!(extract_node_names(lines.iter().copied()), expected);
}

#[test]
fn greedy_match_keeps_everything_before_last_in() {
    let nodes = extract_node_names(["Running on agent in pool in /ws"]);
    assert_eq!(nodes, vec!["agent in pool".to_string()]);
}

#[test]
fn console_notes_are_stripped_before_matching() {
    let line = "\u{1b}[8mha:AAAAWB+LCAAAAAAAAP9b\u{1b}[0mRunning on linux-2 in /ws/job";
    assert_eq!(extract_node_names([line]), vec!["linux-2".to_string()]);
}

#[test]
fn reads_console_log_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("log");
    std::fs::write(&path, b"Running on n1 in /w\n\xffgarbage\nRunning on n2 in /w\n").unwrap();
    assert_eq!(node_names_from_file(&path).unwrap(), vec!["n1".to_string(), "n2".to_string()]);
}

#[test]
fn missing_console_log_is_error() {
    let dir = TempDir::new().unwrap();
    assert!(node_names_from_file(&dir.path().join("nope")).is_err());
}
