//! Configuration structures and constants for the framesieve-core library.
//!
//! This module provides the configuration for a pipeline run: where the video
//! list and output tree live, the similarity threshold, how to reach the
//! oracle, and how much work may run concurrently.

mod builder;

use crate::error::{CoreError, CoreResult};

use std::path::PathBuf;
use std::time::Duration;

pub use builder::CoreConfigBuilder;

// Default constants

/// Default similarity threshold. Frames scoring at or above it are static.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default timeout for a single oracle round trip.
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default wall-clock limit for one decoder process.
pub const DEFAULT_DECODE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Stills sampled per second of source video.
pub const DEFAULT_SAMPLE_FPS: u32 = 1;

/// Image format of decoded stills.
pub const DEFAULT_FRAME_EXTENSION: &str = "png";

/// Width of the zero-padded sequence number in still filenames.
pub const FRAME_INDEX_WIDTH: usize = 10;

/// Name of the per-video subdirectory that receives decoded stills.
pub const FRAMES_DIR_NAME: &str = "frames";

/// What the retention stage does with a frame the oracle could not score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OracleFailurePolicy {
    /// Keep the frame. Nothing is lost when the oracle is unavailable.
    #[default]
    Retain,
    /// Drop the frame as if it had been classified static.
    Drop,
}

impl std::str::FromStr for OracleFailurePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "retain" | "keep" => Ok(Self::Retain),
            "drop" | "skip" => Ok(Self::Drop),
            other => Err(CoreError::Config(format!(
                "Unknown oracle failure policy '{other}' (expected 'retain' or 'drop')"
            ))),
        }
    }
}

impl std::fmt::Display for OracleFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retain => f.write_str("retain"),
            Self::Drop => f.write_str("drop"),
        }
    }
}

/// Main configuration structure for the framesieve-core library.
///
/// Usually produced by the CLI from its arguments and handed to
/// [`crate::processing::run`]. Every field has a default except the oracle
/// address, which [`CoreConfig::validate`] insists on.
///
/// # Examples
///
/// ```rust,no_run
/// use framesieve_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .video_list(PathBuf::from("/data/videos.txt"))
///     .output_root(PathBuf::from("/data/keyframes"))
///     .threshold(0.8)
///     .oracle_addr("127.0.0.1:9000")
///     .decode_jobs(4)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Text file listing one video path per line
    pub video_list: PathBuf,

    /// Root of the output tree; video `i` lands in `<output_root>/<i>/`
    pub output_root: PathBuf,

    /// Similarity threshold; a frame is kept only when its score is below it
    pub threshold: f64,

    /// Oracle address, either `host:port` or a full `http(s)://` URL
    pub oracle_addr: String,

    /// Timeout for one oracle round trip
    pub oracle_timeout: Duration,

    /// Wall-clock limit per decoder process (`None` waits forever)
    pub decode_timeout: Option<Duration>,

    /// Videos decoded concurrently
    pub decode_jobs: usize,

    /// Videos scored concurrently
    pub retention_jobs: usize,

    /// Stills sampled per second of video
    pub sample_fps: u32,

    /// Extension of decoded stills (without the dot)
    pub frame_extension: String,

    /// Outcome for frames the oracle could not score
    pub on_oracle_error: OracleFailurePolicy,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            video_list: PathBuf::from("videos.txt"),
            output_root: PathBuf::from("."),
            threshold: DEFAULT_THRESHOLD,
            oracle_addr: String::new(),
            oracle_timeout: DEFAULT_ORACLE_TIMEOUT,
            decode_timeout: Some(DEFAULT_DECODE_TIMEOUT),
            decode_jobs: 1,
            retention_jobs: 1,
            sample_fps: DEFAULT_SAMPLE_FPS,
            frame_extension: DEFAULT_FRAME_EXTENSION.to_string(),
            on_oracle_error: OracleFailurePolicy::default(),
        }
    }
}

impl CoreConfig {
    /// Creates a configuration with the required values and defaults for the rest.
    pub fn new(
        video_list: PathBuf,
        output_root: PathBuf,
        threshold: f64,
        oracle_addr: impl Into<String>,
    ) -> Self {
        Self {
            video_list,
            output_root,
            threshold,
            oracle_addr: oracle_addr.into(),
            ..Default::default()
        }
    }

    /// Checks the configuration before any processing starts.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.threshold.is_finite() {
            return Err(CoreError::Config(format!(
                "threshold must be a finite number, got {}",
                self.threshold
            )));
        }

        if self.oracle_addr.trim().is_empty() {
            return Err(CoreError::Config(
                "oracle address must not be empty".to_string(),
            ));
        }

        if self.decode_jobs == 0 || self.retention_jobs == 0 {
            return Err(CoreError::Config(
                "job counts must be at least 1".to_string(),
            ));
        }

        if self.oracle_timeout.is_zero() {
            return Err(CoreError::Config(
                "oracle timeout must be greater than zero".to_string(),
            ));
        }

        if self.decode_timeout.is_some_and(|t| t.is_zero()) {
            return Err(CoreError::Config(
                "decode timeout must be greater than zero (omit it to wait forever)".to_string(),
            ));
        }

        if self.sample_fps == 0 {
            return Err(CoreError::Config(
                "sampling rate must be at least 1 frame per second".to_string(),
            ));
        }

        if self.frame_extension.is_empty() || self.frame_extension.contains(['.', '/', '\\']) {
            return Err(CoreError::Config(format!(
                "invalid frame extension '{}'",
                self.frame_extension
            )));
        }

        Ok(())
    }
}
