// ============================================================================
// framesieve-core/src/processing/decode.rs
// ============================================================================
//
// DECODE STAGE: Sampling Stills from a Video with ffmpeg
//
// Each video is decoded into `<save_dir>/frames/` at a fixed sampling rate,
// one still per sampled instant, named with a zero-padded sequence number so
// that name order equals temporal order.
//
// KEY COMPONENTS:
// - build_decode_command: Assembles the ffmpeg invocation
// - decode_all: Runs it through an FfmpegSpawner and checks the outcome
//
// AI-ASSISTANT-INFO: Video to still-image decoding via ffmpeg

// ---- Internal crate imports ----
use crate::config::{CoreConfig, FRAME_INDEX_WIDTH, FRAMES_DIR_NAME};
use crate::error::{CoreResult, command_failed_error};
use crate::external::{FfmpegProcess, FfmpegSpawner};
use crate::frame_store;

// ---- External crate imports ----
use ffmpeg_sidecar::command::FfmpegCommand;

// ---- Standard library imports ----
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Decoder output lines kept for the error message of a failed decode.
const STDERR_TAIL_LINES: usize = 20;

/// Returns the ffmpeg output pattern for stills in `frames_dir`, e.g. `frames/%010d.png`.
pub fn frame_output_pattern(frames_dir: &Path, extension: &str) -> PathBuf {
    frames_dir.join(format!("%0{FRAME_INDEX_WIDTH}d.{extension}"))
}

/// Builds the ffmpeg command that samples `video_path` into `frames_dir`.
///
/// Equivalent to
/// `ffmpeg -nostdin -hide_banner -y -i <video> -f image2 -vf fps=fps=<n> <frames_dir>/%010d.<ext>`.
pub fn build_decode_command(
    video_path: &Path,
    frames_dir: &Path,
    sample_fps: u32,
    extension: &str,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.arg("-nostdin");
    cmd.arg("-hide_banner");
    cmd.arg("-y");
    cmd.input(video_path.to_string_lossy().as_ref());
    cmd.arg("-f");
    cmd.arg("image2");
    cmd.arg("-vf");
    cmd.arg(format!("fps=fps={sample_fps}"));
    cmd.output(frame_output_pattern(frames_dir, extension).to_string_lossy().as_ref());
    cmd
}

/// Decodes `video_path` into `save_dir/frames` and returns that directory.
///
/// Creates the directory tree first. Blocks until the decoder exits (or the
/// configured timeout kills it), logging its output at debug level.
///
/// # Errors
///
/// * Directory creation failure
/// * Decoder launch failure, timeout, or non-zero exit
pub fn decode_all<S: FfmpegSpawner>(
    spawner: &S,
    video_path: &Path,
    save_dir: &Path,
    config: &CoreConfig,
) -> CoreResult<PathBuf> {
    let frames_dir = save_dir.join(FRAMES_DIR_NAME);
    frame_store::ensure_dir(&frames_dir).inspect_err(|e| {
        log::error!("Cannot create frames directory {}: {}", frames_dir.display(), e);
    })?;

    let mut cmd = build_decode_command(
        video_path,
        &frames_dir,
        config.sample_fps,
        &config.frame_extension,
    );
    log::debug!("Running decode command: {:?}", cmd.as_inner());

    let mut tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);
    let status = spawner
        .spawn(cmd)?
        .wait_with_output(config.decode_timeout, |line| {
            log::debug!("[ffmpeg {}] {}", video_path.display(), line);
            if tail.len() == STDERR_TAIL_LINES {
                tail.pop_front();
            }
            tail.push_back(line.to_string());
        })?;

    if !status.success() {
        log::error!("Decoding {} failed: {}", video_path.display(), status);
        return Err(command_failed_error(
            "ffmpeg (decode)",
            status,
            Vec::from(tail).join("\n"),
        ));
    }

    log::info!(
        "Decoded {} into {}",
        video_path.display(),
        frames_dir.display()
    );
    Ok(frames_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::external::mocks::MockFfmpegSpawner;
    use std::fs;
    use tempfile::tempdir;

    fn args_of(mut cmd: FfmpegCommand) -> Vec<String> {
        cmd.as_inner()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn test_config() -> CoreConfig {
        CoreConfig::new(PathBuf::from("list"), PathBuf::from("out"), 0.5, "127.0.0.1:1")
    }

    #[test]
    fn test_decode_command_samples_one_frame_per_second() {
        let args = args_of(build_decode_command(
            Path::new("/videos/clip.mp4"),
            Path::new("/out/0/frames"),
            1,
            "png",
        ));

        let input_pos = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[input_pos + 1], "/videos/clip.mp4");
        assert!(args.windows(2).any(|w| w[0] == "-vf" && w[1] == "fps=fps=1"));
        assert!(args.windows(2).any(|w| w[0] == "-f" && w[1] == "image2"));
        assert!(args.contains(&"-nostdin".to_string()));
        assert_eq!(args.last().unwrap(), "/out/0/frames/%010d.png");
    }

    #[test]
    fn test_decode_all_creates_frames_dir() -> CoreResult<()> {
        let root = tempdir()?;
        let save_dir = root.path().join("0");
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("clip.mp4", vec![b"a".to_vec(), b"b".to_vec()]);

        let frames_dir = decode_all(&spawner, Path::new("clip.mp4"), &save_dir, &test_config())?;

        assert_eq!(frames_dir, save_dir.join("frames"));
        let mut names: Vec<String> = fs::read_dir(&frames_dir)?
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["0000000001.png", "0000000002.png"]);
        Ok(())
    }

    #[test]
    fn test_decode_all_reports_non_zero_exit() {
        let root = tempdir().unwrap();
        let spawner = MockFfmpegSpawner::new();
        spawner.add_exit_error_expectation(
            "broken.mp4",
            vec!["broken.mp4: Invalid data found when processing input".to_string()],
            1,
        );

        let result = decode_all(&spawner, Path::new("broken.mp4"), root.path(), &test_config());
        match result {
            Err(CoreError::CommandFailed(_, status, stderr)) => {
                assert_eq!(status.code(), Some(1));
                assert!(stderr.contains("Invalid data"));
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_all_reports_launch_failure() {
        let root = tempdir().unwrap();
        let spawner = MockFfmpegSpawner::new();
        spawner.add_spawn_error_expectation(
            "clip.mp4",
            CoreError::CommandStart(
                "ffmpeg (mock)".to_string(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "ffmpeg not installed"),
            ),
        );

        let result = decode_all(&spawner, Path::new("clip.mp4"), root.path(), &test_config());
        assert!(matches!(result, Err(CoreError::CommandStart(_, _))));
    }

    #[test]
    fn test_decode_all_fails_when_directory_cannot_be_created() {
        let root = tempdir().unwrap();
        let blocker = root.path().join("0");
        fs::write(&blocker, b"not a directory").unwrap();
        let spawner = MockFfmpegSpawner::new();

        let result = decode_all(&spawner, Path::new("clip.mp4"), &blocker, &test_config());
        assert!(result.is_err());
        assert!(spawner.get_received_calls().is_empty());
    }
}
