// ============================================================================
// framesieve-core/src/processing/retention.rs
// ============================================================================
//
// RETENTION STAGE: Scoring Decoded Stills and Keeping the Non-Static Ones
//
// Walks a frames directory in name order, asks the oracle about every still
// and copies the stills that are not static into the video's output
// directory under their original names. Source stills are never deleted.
//
// KEY COMPONENTS:
// - is_duplicate: The threshold predicate
// - retain_frames: Per-video retention loop
// - RetentionReport: Counters describing what happened to each still
//
// AI-ASSISTANT-INFO: Threshold-based frame retention driven by the oracle

// ---- Internal crate imports ----
use crate::config::OracleFailurePolicy;
use crate::error::{CoreError, CoreResult};
use crate::frame_store;
use crate::oracle::{OracleClient, OracleTransport};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};

/// A decoded still and its position in the video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// 0-based position in name order
    pub id: i64,
    /// Original file name, reused for the retained copy
    pub name: String,
    pub content: Vec<u8>,
}

/// What happened to the stills of one video.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionReport {
    pub frames_seen: usize,
    pub retained: usize,
    pub dropped: usize,
    pub unreadable: usize,
    pub oracle_failures: usize,
    pub write_failures: usize,
    /// Paths of the copies written to the output directory, in frame order
    pub retained_files: Vec<PathBuf>,
}

/// True when a frame with `score` counts as static under `threshold`.
///
/// Retention is exclusive below the threshold: a score equal to the
/// threshold is a duplicate.
#[inline]
pub fn is_duplicate(score: f64, threshold: f64) -> bool {
    score >= threshold
}

/// Scores every still in `frames_dir` and copies the keepers to `output_dir`.
///
/// The oracle sees the frames directory path as the video id and the 0-based
/// position as the frame id, strictly increasing in file order. Per-frame
/// problems (unreadable file, oracle failure, failed copy) are logged and
/// counted, and processing moves on to the next frame. Frames the oracle
/// could not score follow `on_oracle_error`.
///
/// # Errors
///
/// Only when `output_dir` cannot be created or `frames_dir` cannot be listed.
pub fn retain_frames<T: OracleTransport>(
    oracle: &OracleClient<T>,
    frames_dir: &Path,
    output_dir: &Path,
    threshold: f64,
    on_oracle_error: OracleFailurePolicy,
) -> CoreResult<RetentionReport> {
    frame_store::ensure_dir(output_dir)?;
    let frame_paths = frame_store::list_frames(frames_dir).inspect_err(|e| {
        log::error!("Cannot read frames directory {}: {}", frames_dir.display(), e);
    })?;

    let video_id = frames_dir.to_string_lossy();
    let mut report = RetentionReport::default();

    for (position, path) in frame_paths.iter().enumerate() {
        report.frames_seen += 1;

        let frame = match load_frame(position, path) {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("Skipping unreadable frame {}: {}", path.display(), e);
                report.unreadable += 1;
                continue;
            }
        };

        let keep = match oracle.query_is_static(&video_id, frame.id, &frame.content) {
            Ok(result) => {
                let duplicate = is_duplicate(result.score, threshold);
                log::debug!(
                    "{} frame {}: score={:.4} static={} -> {}",
                    video_id,
                    frame.id,
                    result.score,
                    result.is_static,
                    if duplicate { "drop" } else { "keep" }
                );
                !duplicate
            }
            Err(e) => {
                report.oracle_failures += 1;
                log::warn!(
                    "Could not score {} frame {} ({}); applying '{}' policy",
                    video_id,
                    frame.id,
                    e,
                    on_oracle_error
                );
                on_oracle_error == OracleFailurePolicy::Retain
            }
        };

        if !keep {
            report.dropped += 1;
            continue;
        }

        match frame_store::write_frame(output_dir, &frame.name, &frame.content) {
            Ok(dest) => {
                report.retained += 1;
                report.retained_files.push(dest);
            }
            Err(e) => {
                log::warn!(
                    "Failed to copy frame {} to {}: {}",
                    frame.name,
                    output_dir.display(),
                    e
                );
                report.write_failures += 1;
            }
        }
    }

    log::info!(
        "{}: {} frame(s) seen, {} retained, {} dropped",
        video_id,
        report.frames_seen,
        report.retained,
        report.dropped
    );
    Ok(report)
}

fn load_frame(position: usize, path: &Path) -> CoreResult<Frame> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CoreError::PathError(format!("No file name in {}", path.display())))?;
    let content = frame_store::read_frame(path)?;
    Ok(Frame {
        id: position as i64,
        name,
        content,
    })
}
