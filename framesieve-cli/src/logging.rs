// ============================================================================
// framesieve-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and File Logging for the CLI
//
// The core library logs through the `log` facade only. This module installs
// the global logger for the binary: timestamped lines on stderr and, when
// requested, the same lines appended to a log file.
//
// KEY COMPONENTS:
// - init_logging: Builds and installs the fern dispatcher
// - get_timestamp: Compact timestamp for run banners
//
// USAGE:
// - default: Info and above
// - -v/--verbose: Debug and above (decoder output, per-frame scores)
//
// AI-ASSISTANT-INFO: Logger installation and timestamp helpers

// ---- Internal crate imports ----
use crate::error::{CliErrorContext, CliResult};

// ---- External crate imports ----
use framesieve_core::CoreError;
use log::LevelFilter;

// ---- Standard library imports ----
use std::fs;
use std::path::Path;

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Maps the verbosity flag to a level filter.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger.
///
/// Lines go to stderr, and to `log_file` when given; the file's parent
/// directories are created and the file is appended to. Fails if a logger
/// is already installed.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> CliResult<()> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{:<5}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level_for(verbose))
        // Third-party HTTP internals are noise even in verbose mode
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("rustls", LevelFilter::Warn)
        .chain(std::io::stderr());

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .cli_with_context(|| format!("Creating log directory {}", parent.display()))?;
        }
        let file = fern::log_file(path)
            .cli_with_context(|| format!("Opening log file {}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    dispatch
        .apply()
        .map_err(|e| CoreError::OperationFailed(format!("Failed to install logger: {e}")))
}
