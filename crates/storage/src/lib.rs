// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jl-storage: Size-bounded CSV job log with archive rotation

pub mod archive;
pub mod format;
mod size_probe;
mod writer;

#[cfg(any(test, feature = "test-support"))]
pub use size_probe::FixedSizeProbe;
pub use size_probe::{bytes_to_mb, FsSizeProbe, SizeProbe, BYTES_PER_MB};
pub use writer::{Appended, RotatingLogWriter, DEFAULT_MAX_SIZE_MB};
