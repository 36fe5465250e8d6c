//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `extract` command.
/// This command decodes the listed videos and keeps their non-static frames.
pub mod extract;
