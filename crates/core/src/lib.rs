// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jl-core: Data model shared by the job logger crates

pub mod macros;

pub mod clock;
pub mod event;
pub mod fault;
pub mod id;
pub mod record;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use event::JobEvent;
pub use fault::LogFault;
pub use id::RunId;
#[cfg(any(test, feature = "test-support"))]
pub use record::JobRecordBuilder;
pub use record::{format_timestamp, JobRecord, JobResult, ParseJobResultError};
