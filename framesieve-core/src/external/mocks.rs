// framesieve-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::{FfmpegProcess, FfmpegSpawner};
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock implementation of FfmpegProcess.
#[derive(Clone, Debug)]
pub struct MockFfmpegProcess {
    /// Diagnostic lines passed to the handler.
    pub output_lines: Vec<String>,
    /// Exit status returned once the lines are replayed.
    pub exit_status: ExitStatus,
    /// Report a timeout instead of an exit status.
    pub times_out: bool,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn wait_with_output<F>(
        &mut self,
        timeout: Option<Duration>,
        mut handler: F,
    ) -> CoreResult<ExitStatus>
    where
        F: FnMut(&str),
    {
        for line in &self.output_lines {
            handler(line);
        }
        if self.times_out {
            let secs = timeout.map(|t| t.as_secs()).unwrap_or_default();
            return Err(CoreError::CommandTimeout("ffmpeg (mock)".to_string(), secs));
        }
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    /// Stills written into the output pattern's directory when matched.
    pub frames_to_create: Vec<Vec<u8>>,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// An expectation matches when any argument contains its pattern. Each
/// expectation is consumed by the first call it matches.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Arc<Mutex<Vec<MockFfmpegExpectation>>>,
    received_calls: Arc<Mutex<Vec<Vec<String>>>>,
}

fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        frames_to_create: Vec<Vec<u8>>,
    ) {
        self.expectations.lock().unwrap().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            frames_to_create,
        });
    }

    /// Expects a successful decode that writes one still per entry of `frames`.
    pub fn add_success_expectation(&self, arg_pattern: &str, frames: Vec<Vec<u8>>) {
        let process = MockFfmpegProcess {
            output_lines: vec![format!("mock decode of {arg_pattern}")],
            exit_status: exit_status(0),
            times_out: false,
        };
        self.add_expectation(arg_pattern, Ok(process), frames);
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), Vec::new());
    }

    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        lines: Vec<String>,
        exit_code: i32,
    ) {
        let process = MockFfmpegProcess {
            output_lines: lines,
            exit_status: exit_status(exit_code),
            times_out: false,
        };
        self.add_expectation(arg_pattern, Ok(process), Vec::new());
    }

    pub fn add_timeout_expectation(&self, arg_pattern: &str) {
        let process = MockFfmpegProcess {
            output_lines: Vec::new(),
            exit_status: exit_status(0),
            times_out: true,
        };
        self.add_expectation(arg_pattern, Ok(process), Vec::new());
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.lock().unwrap().clone()
    }
}

/// Expands an ffmpeg `%0Nd` sequence pattern for a 1-based index.
fn expand_sequence_pattern(pattern: &str, index: usize) -> String {
    let start = pattern.rfind('%');
    let end = start.and_then(|start| pattern[start..].find('d').map(|offset| start + offset));
    match start.zip(end) {
        Some((start, end)) => {
            let width: usize = pattern[start + 1..end].parse().unwrap_or(0);
            format!(
                "{}{:0width$}{}",
                &pattern[..start],
                index,
                &pattern[end + 1..],
                width = width
            )
        }
        _ => pattern.to_string(),
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .as_inner()
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.lock().unwrap().push(args.clone());

        let expectation = {
            let mut expectations = self.expectations.lock().unwrap();
            let found = expectations
                .iter()
                .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));
            match found {
                Some(index) => expectations.remove(index),
                None => panic!(
                    "MockFfmpegSpawner: No expectation found for command args: {:?}",
                    args
                ),
            }
        };
        log::info!(
            "MockFfmpegSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );

        let process = expectation.result.inspect_err(|err| {
            log::warn!("MockFfmpegSpawner simulating spawn error: {:?}", err);
        })?;
        if let Some(pattern) = args.last() {
            for (i, content) in expectation.frames_to_create.iter().enumerate() {
                let path = PathBuf::from(expand_sequence_pattern(pattern, i + 1));
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, content)?;
                log::debug!("MockFfmpegSpawner created still {:?}", path);
            }
        }
        Ok(process)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_sequence_pattern() {
        assert_eq!(
            expand_sequence_pattern("/out/frames/%010d.png", 7),
            "/out/frames/0000000007.png"
        );
        assert_eq!(expand_sequence_pattern("/data/d/%03d.jpg", 12), "/data/d/012.jpg");
        assert_eq!(expand_sequence_pattern("plain.png", 7), "plain.png");
    }
}
