// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;

use crate::lifecycle::LifecycleError;

/// Resolve base directory: JL_HOME > XDG_STATE_HOME/joblog > ~/.local/state/joblog
pub fn base_dir() -> Result<PathBuf, LifecycleError> {
    if let Some(dir) = non_empty_var("JL_HOME") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty_var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("joblog"));
    }
    let home = dirs::home_dir().ok_or(LifecycleError::NoStateDir)?;
    Ok(home.join(".local/state/joblog"))
}

/// Config file override (`JL_CONFIG`).
pub fn config_path() -> Option<PathBuf> {
    non_empty_var("JL_CONFIG").map(PathBuf::from)
}

/// `JL_LOG_ENABLED` override for `log_enabled`. Unparseable values are ignored.
pub fn log_enabled_override() -> Option<bool> {
    match non_empty_var("JL_LOG_ENABLED")?.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Tracing filter directive (`JL_LOG`, default `info`).
pub fn log_filter() -> String {
    non_empty_var("JL_LOG").unwrap_or_else(|| "info".to_string())
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
