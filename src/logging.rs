//! `tracing` subscriber setup.
//!
//! The terminal owns stdout/stderr while the runtime is active, so logs only go
//! to a file. Without a configured file no subscriber is installed and all
//! `tracing` macros are no-ops.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::EnvConfig;

/// Install the global subscriber described by `config`.
///
/// Log level is controlled by:
/// 1. `FOLIO_DEBUG=1` sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Returns `Ok(false)` when no log file is configured.
pub fn init(config: &EnvConfig) -> io::Result<bool> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = if config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .is_ok();

    Ok(installed)
}
