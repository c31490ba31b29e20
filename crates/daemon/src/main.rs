// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jld: records job executions reported on stdin to a rotating CSV log

mod env;
mod lifecycle;
mod logging;
mod protocol;

use std::process::ExitCode;

use lifecycle::{startup, Config};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("jld: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match logging::init(&config.daemon_log_path, &env::log_filter()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("jld: {e}");
            return ExitCode::FAILURE;
        }
    };

    let daemon = match startup(config, env::log_enabled_override()) {
        Ok(daemon) => daemon,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("jld: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    let result = daemon.run(stdin, shutdown).await;
    daemon.shutdown();

    match result {
        Ok(stats) => {
            tracing::info!(events = stats.events, malformed = stats.malformed, "input closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "event loop failed");
            eprintln!("jld: {e}");
            ExitCode::FAILURE
        }
    }
}
