// ============================================================================
// framesieve-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the External Decoder
//
// This module encapsulates interactions with ffmpeg, the external tool that
// turns a video into numbered stills. It provides a spawner abstraction so the
// decode stage can be exercised with a fake process in tests.
//
// KEY COMPONENTS:
// - Traits for ffmpeg process interaction (FfmpegSpawner, FfmpegProcess)
// - Concrete implementation using ffmpeg-sidecar with a wall-clock timeout
// - Dependency checking
//
// AI-ASSISTANT-INFO: External tool interactions and abstractions for ffmpeg

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Scripted ffmpeg spawner for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs the command with `-version` and discards its output.
///
/// # Returns
///
/// * `Ok(())` - If the command could be launched
/// * `Err(CoreError::DependencyNotFound)` - If the command is not on the PATH
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}
