// ============================================================================
// framesieve-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning and supervising FFmpeg
// processes: forwarding their stderr and stdout lines while they run, collecting
// the exit status, and killing them when they exceed a time limit.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
//
// AI-ASSISTANT-INFO: FFmpeg process management and execution abstraction

use crate::error::{CoreError, CoreResult, command_start_error, command_wait_error};
use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use std::io::{BufRead, BufReader, Read};
use std::process::ExitStatus;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running process is checked for exit or timeout.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long output already written is still collected after the process exits.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Blocks until the process exits, passing each line the process writes to
    /// stderr or stdout to `handler` as it arrives.
    ///
    /// With a `timeout`, a process still running after that long is killed and
    /// `CoreError::CommandTimeout` is returned.
    fn wait_with_output<F>(
        &mut self,
        timeout: Option<Duration>,
        handler: F,
    ) -> CoreResult<ExitStatus>
    where
        F: FnMut(&str);
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;
    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

/// Forwards each line of `stream` to `tx` until the stream closes.
///
/// The thread is never joined: a descendant of the decoder may keep the pipe
/// open after the decoder itself has exited or been killed.
fn spawn_line_reader<R: Read + Send + 'static>(stream: R, tx: Sender<String>) {
    thread::spawn(move || {
        for line in BufReader::new(stream).lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
}

/// Passes on lines still in flight, for at most `grace`.
fn drain_lines<F: FnMut(&str)>(rx: &Receiver<String>, grace: Duration, handler: &mut F) {
    let deadline = Instant::now() + grace;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(line) => handler(&line),
            Err(_) => break,
        }
    }
}

impl SidecarProcess {
    fn kill_after_timeout(&mut self, limit: Duration) -> CoreError {
        log::warn!(
            "ffmpeg still running after {}s, killing it",
            limit.as_secs()
        );
        if let Err(e) = self.0.kill() {
            log::error!("Failed to kill timed out ffmpeg process: {}", e);
        }
        if let Err(e) = self.0.wait() {
            log::error!("Failed to reap timed out ffmpeg process: {}", e);
        }
        CoreError::CommandTimeout("ffmpeg".to_string(), limit.as_secs())
    }
}

impl FfmpegProcess for SidecarProcess {
    fn wait_with_output<F>(
        &mut self,
        timeout: Option<Duration>,
        mut handler: F,
    ) -> CoreResult<ExitStatus>
    where
        F: FnMut(&str),
    {
        // Both pipes are drained so the decoder never blocks on a full buffer
        let (tx, rx) = mpsc::channel::<String>();
        if let Some(stderr) = self.0.take_stderr() {
            spawn_line_reader(stderr, tx.clone());
        }
        if let Some(stdout) = self.0.take_stdout() {
            spawn_line_reader(stdout, tx.clone());
        }
        drop(tx);

        let started = Instant::now();
        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => handler(&line),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => thread::sleep(POLL_INTERVAL),
            }

            let exited = self
                .0
                .as_inner_mut()
                .try_wait()
                .map_err(|e| command_wait_error("ffmpeg (sidecar)", e))?;

            if let Some(status) = exited {
                drain_lines(&rx, DRAIN_GRACE, &mut handler);
                return Ok(status);
            }

            if let Some(limit) = timeout {
                if started.elapsed() >= limit {
                    let err = self.kill_after_timeout(limit);
                    for line in rx.try_iter() {
                        handler(&line);
                    }
                    return Err(err);
                }
            }
        }
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg (sidecar)", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    // ETXTBSY: another test thread forked while the script was still open for writing
    const TEXT_FILE_BUSY: i32 = 26;

    /// Writes an executable shell script standing in for ffmpeg.
    fn write_decoder(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-ffmpeg");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn spawn_decoder(path: &Path) -> SidecarProcess {
        for _ in 0..20 {
            let mut cmd = FfmpegCommand::new_with_path(path);
            match cmd.spawn() {
                Ok(child) => return SidecarProcess(child),
                Err(e) if e.raw_os_error() == Some(TEXT_FILE_BUSY) => {
                    thread::sleep(Duration::from_millis(50));
                }
                Err(e) => panic!("Failed to start {}: {}", path.display(), e),
            }
        }
        panic!("{} stayed busy", path.display());
    }

    type DecoderRun = (CoreResult<ExitStatus>, Vec<String>, Duration);

    fn run_decoder(body: &str, timeout: Option<Duration>) -> DecoderRun {
        let dir = tempdir().unwrap();
        let mut process = spawn_decoder(&write_decoder(dir.path(), body));
        let mut lines = Vec::new();
        let started = Instant::now();
        let result = process.wait_with_output(timeout, |line| lines.push(line.to_string()));
        (result, lines, started.elapsed())
    }

    #[test]
    fn test_exit_status_and_stderr_lines() {
        let (result, lines, _) = run_decoder("echo a >&2\necho b >&2\nexit 3", None);

        assert_eq!(result.unwrap().code(), Some(3));
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_stdout_is_drained() {
        // Far more than a pipe buffer; a reader that ignores stdout would stall here
        let (result, lines, elapsed) = run_decoder(
            "i=0\n\
             while [ $i -lt 20000 ]; do echo \"frame line $i\"; i=$((i+1)); done\n\
             echo done >&2",
            Some(Duration::from_secs(30)),
        );

        assert!(result.unwrap().success());
        assert_eq!(lines.iter().filter(|l| l.starts_with("frame line")).count(), 20000);
        assert!(lines.contains(&"done".to_string()));
        assert!(elapsed < Duration::from_secs(30));
    }

    #[test]
    fn test_timeout_kills_process() {
        let (result, lines, elapsed) = run_decoder(
            "echo started >&2\nexec sleep 30",
            Some(Duration::from_secs(1)),
        );

        assert!(matches!(result, Err(CoreError::CommandTimeout(_, 1))));
        assert_eq!(lines, vec!["started"]);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_returns_while_descendant_holds_pipes() {
        let (result, _, elapsed) = run_decoder(
            "sleep 30 &\necho started >&2\nexec sleep 30",
            Some(Duration::from_secs(1)),
        );

        assert!(matches!(result, Err(CoreError::CommandTimeout(_, 1))));
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_exit_returns_while_descendant_holds_pipes() {
        let (result, lines, elapsed) = run_decoder("sleep 30 &\necho bye >&2\nexit 0", None);

        assert!(result.unwrap().success());
        assert_eq!(lines, vec!["bye"]);
        assert!(elapsed < Duration::from_secs(5));
    }
}
