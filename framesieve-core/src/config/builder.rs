// ============================================================================
// framesieve-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// This module implements the builder pattern for the CoreConfig structure,
// providing a fluent API for creating and configuring CoreConfig instances.
//
// KEY COMPONENTS:
// - CoreConfigBuilder: Builder struct for creating CoreConfig instances
//
// AI-ASSISTANT-INFO: Builder pattern implementation for CoreConfig

// ---- Standard library imports ----
use std::path::PathBuf;
use std::time::Duration;

// ---- Internal crate imports ----
use super::{CoreConfig, OracleFailurePolicy};

/// Builder for creating CoreConfig instances.
///
/// Unset fields keep the values from `CoreConfig::default()`. The builder does
/// not validate; call [`CoreConfig::validate`] on the result.
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the video list file.
    pub fn video_list(mut self, path: PathBuf) -> Self {
        self.config.video_list = path;
        self
    }

    /// Sets the output root directory.
    pub fn output_root(mut self, path: PathBuf) -> Self {
        self.config.output_root = path;
        self
    }

    /// Sets the similarity threshold.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Sets the oracle address.
    pub fn oracle_addr(mut self, addr: &str) -> Self {
        self.config.oracle_addr = addr.to_string();
        self
    }

    /// Sets the timeout for one oracle round trip.
    pub fn oracle_timeout(mut self, timeout: Duration) -> Self {
        self.config.oracle_timeout = timeout;
        self
    }

    /// Sets the decoder wall-clock limit; `None` disables it.
    pub fn decode_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.decode_timeout = timeout;
        self
    }

    /// Sets how many videos are decoded concurrently.
    pub fn decode_jobs(mut self, jobs: usize) -> Self {
        self.config.decode_jobs = jobs;
        self
    }

    /// Sets how many videos are scored concurrently.
    pub fn retention_jobs(mut self, jobs: usize) -> Self {
        self.config.retention_jobs = jobs;
        self
    }

    /// Sets the decoder sampling rate.
    pub fn sample_fps(mut self, fps: u32) -> Self {
        self.config.sample_fps = fps;
        self
    }

    /// Sets the still image extension.
    pub fn frame_extension(mut self, extension: &str) -> Self {
        self.config.frame_extension = extension.to_string();
        self
    }

    /// Sets the outcome for frames the oracle could not score.
    pub fn on_oracle_error(mut self, policy: OracleFailurePolicy) -> Self {
        self.config.on_oracle_error = policy;
        self
    }

    /// Builds the CoreConfig instance.
    pub fn build(self) -> CoreConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = CoreConfigBuilder::new()
            .video_list(PathBuf::from("/tmp/list.txt"))
            .output_root(PathBuf::from("/tmp/out"))
            .threshold(0.75)
            .oracle_addr("oracle:9000")
            .retention_jobs(3)
            .on_oracle_error(OracleFailurePolicy::Drop)
            .build();

        assert_eq!(config.video_list, PathBuf::from("/tmp/list.txt"));
        assert_eq!(config.output_root, PathBuf::from("/tmp/out"));
        assert_eq!(config.threshold, 0.75);
        assert_eq!(config.oracle_addr, "oracle:9000");
        assert_eq!(config.retention_jobs, 3);
        assert_eq!(config.decode_jobs, 1);
        assert_eq!(config.sample_fps, 1);
        assert_eq!(config.on_oracle_error, OracleFailurePolicy::Drop);
    }
}
