// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jl-engine: Correlates job start/completion events and records finished runs

mod cache;
mod config;
mod listener;
pub mod node_names;

pub use cache::RunCorrelationCache;
pub use config::{ConfigError, LoggerConfig, LOG_FILE_EXT, LOG_FILE_NAME, LOG_FILE_SHORTNAME};
pub use listener::{Completion, JobRunListener};
pub use node_names::extract_node_names;
