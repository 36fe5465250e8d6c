// ============================================================================
// framesieve-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reports failures with the core library's error type and attaches
// human-readable context where a bare core error would be too terse.
//
// KEY COMPONENTS:
// - CliResult: Type alias for CLI operations
// - Error conversion utilities
//
// AI-ASSISTANT-INFO: CLI error handling utilities

// ---- Internal crate imports ----
use framesieve_core::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::fmt;

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type for CLI operations.
pub type CliResult<T> = CoreResult<T>;

// ============================================================================
// ERROR CONVERSION UTILITIES
// ============================================================================

/// Attaches context to an error, producing a `CoreError::OperationFailed`
/// that reads "<context>: <cause>".
pub trait CliErrorContext<T> {
    /// Adds context built lazily by `f`; it is only evaluated on error.
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", f(), core_error))
        })
    }
}
