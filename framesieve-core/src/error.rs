// ============================================================================
// framesieve-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types and Utilities
//
// This module defines the error types used throughout the framesieve-core
// library, together with helper functions for building the process-related
// variants.
//
// KEY COMPONENTS:
// - CoreError: Main error enum for all library operations
// - CoreResult: Type alias for Result with CoreError
// - Helper functions for creating command errors
//
// AI-ASSISTANT-INFO: Error handling infrastructure for framesieve-core

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::io;
use std::process::ExitStatus;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Errors produced by the framesieve-core library.
///
/// Frame-level and video-level failures are recoverable: the pipeline logs
/// them and continues with the next frame or video. Only configuration errors
/// stop a run before it starts.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required dependency '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed waiting for command '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("Command '{0}' failed with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Command '{0}' timed out after {1} seconds")]
    CommandTimeout(String, u64),

    #[error("Oracle request failed: {0}")]
    OracleRequest(String),

    #[error("Oracle returned an invalid response: {0}")]
    OracleResponse(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for framesieve-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CoreError::OracleResponse(err.to_string())
        } else {
            CoreError::OracleRequest(err.to_string())
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Builds the error for a command that could not be launched.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds the error for a command whose exit status could not be collected.
pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Builds the error for a command that exited unsuccessfully.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}
