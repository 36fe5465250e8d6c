// ============================================================================
// framesieve-core/src/processing/pipeline.rs
// ============================================================================
//
// PIPELINE DRIVER: Sequencing Decode and Retention over a Video List
//
// Reads the video list, decodes every video, then runs retention over the
// videos that decoded successfully. A failure for one video is logged and
// recorded; it never stops the others.
//
// WORKFLOW:
// 1. Validate the configuration
// 2. Read the video list and assign each entry an index and output directory
// 3. Decode pass: all videos, on a pool of `decode_jobs` workers
// 4. Retention pass: decoded videos only, on a pool of `retention_jobs` workers
// 5. Report outcomes in video-index order
//
// AI-ASSISTANT-INFO: Batch orchestration of the decode and retention stages

// ---- Internal crate imports ----
use crate::config::{CoreConfig, FRAMES_DIR_NAME};
use crate::discovery::read_video_list;
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegSpawner, SidecarSpawner};
use crate::oracle::{HttpOracleTransport, OracleClient, OracleTransport};
use crate::processing::decode::decode_all;
use crate::processing::retention::{RetentionReport, retain_frames};

// ---- External crate imports ----
use rayon::prelude::*;

// ---- Standard library imports ----
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

// ============================================================================
// TYPES
// ============================================================================

/// One entry of the video list, ready to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTask {
    /// Position in the video list (blank lines excluded)
    pub index: usize,
    /// Identifier derived from the index; also the output subdirectory name
    pub video_id: String,
    pub source_path: PathBuf,
    /// `<output_root>/<index>`: receives retained stills
    pub output_dir: PathBuf,
}

impl VideoTask {
    pub fn new(index: usize, source_path: PathBuf, output_root: &Path) -> Self {
        let video_id = index.to_string();
        let output_dir = output_root.join(&video_id);
        Self {
            index,
            video_id,
            source_path,
            output_dir,
        }
    }

    /// `<output_root>/<index>/frames`: receives decoded stills
    pub fn frames_dir(&self) -> PathBuf {
        self.output_dir.join(FRAMES_DIR_NAME)
    }
}

/// Pipeline stage in which a video failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decode,
    Retention,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Decode => f.write_str("decode"),
            Stage::Retention => f.write_str("retention"),
        }
    }
}

/// A video that was dropped from the run.
#[derive(Debug, Clone)]
pub struct VideoFailure {
    pub task: VideoTask,
    pub stage: Stage,
    pub error: String,
}

/// A video that went through both stages.
#[derive(Debug, Clone)]
pub struct VideoResult {
    pub task: VideoTask,
    pub frames_dir: PathBuf,
    pub report: RetentionReport,
}

/// Outcome of a whole run, ordered by video index.
#[derive(Debug, Clone, Default)]
pub struct PipelineSummary {
    pub videos_listed: usize,
    pub videos_decoded: usize,
    pub completed: Vec<VideoResult>,
    pub failures: Vec<VideoFailure>,
    pub elapsed: Duration,
}

impl PipelineSummary {
    pub fn frames_retained(&self) -> usize {
        self.completed.iter().map(|r| r.report.retained).sum()
    }

    pub fn frames_seen(&self) -> usize {
        self.completed.iter().map(|r| r.report.frames_seen).sum()
    }
}

// ============================================================================
// DRIVER
// ============================================================================

/// Assigns indices and output directories to the listed videos.
pub fn plan_tasks(videos: Vec<PathBuf>, output_root: &Path) -> Vec<VideoTask> {
    videos
        .into_iter()
        .enumerate()
        .map(|(index, path)| VideoTask::new(index, path, output_root))
        .collect()
}

fn build_pool(jobs: usize, name: &'static str) -> CoreResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .thread_name(move |i| format!("{name}-{i}"))
        .build()
        .map_err(|e| {
            CoreError::OperationFailed(format!("Failed to initialize {name} thread pool: {e}"))
        })
}

/// Runs the full pipeline with the given decoder and oracle.
///
/// Returns an error only for an invalid configuration or when a worker pool
/// cannot be created; everything that goes wrong for an individual video is
/// reported in the summary instead.
///
/// # Examples
///
/// ```rust,no_run
/// use framesieve_core::config::CoreConfig;
/// use framesieve_core::external::SidecarSpawner;
/// use framesieve_core::oracle::{HttpOracleTransport, OracleClient};
/// use framesieve_core::processing::run;
/// use std::path::PathBuf;
///
/// let config = CoreConfig::new(
///     PathBuf::from("/data/videos.txt"),
///     PathBuf::from("/data/keyframes"),
///     0.8,
///     "127.0.0.1:9000",
/// );
/// let oracle = OracleClient::new(
///     HttpOracleTransport::new(&config.oracle_addr, config.oracle_timeout).unwrap(),
/// );
///
/// let summary = run(&config, &SidecarSpawner, &oracle).unwrap();
/// println!("{} frames retained", summary.frames_retained());
/// ```
pub fn run<S, T>(
    config: &CoreConfig,
    spawner: &S,
    oracle: &OracleClient<T>,
) -> CoreResult<PipelineSummary>
where
    S: FfmpegSpawner + Sync,
    T: OracleTransport,
{
    config.validate()?;
    let started = Instant::now();

    let tasks = plan_tasks(read_video_list(&config.video_list), &config.output_root);
    let mut summary = PipelineSummary {
        videos_listed: tasks.len(),
        ..Default::default()
    };
    log::info!("{} video(s) to process", tasks.len());

    // ---- Decode pass ----
    let decode_pool = build_pool(config.decode_jobs, "decode")?;
    let decode_results: Vec<CoreResult<PathBuf>> = decode_pool.install(|| {
        tasks
            .par_iter()
            .map(|task| decode_all(spawner, &task.source_path, &task.output_dir, config))
            .collect()
    });

    let mut decoded: Vec<(VideoTask, PathBuf)> = Vec::with_capacity(tasks.len());
    for (task, result) in tasks.into_iter().zip(decode_results) {
        match result {
            Ok(frames_dir) => decoded.push((task, frames_dir)),
            Err(e) => {
                log::error!(
                    "DecodeAll {} ({}) failed: {}. Skipping video.",
                    task.index,
                    task.source_path.display(),
                    e
                );
                summary.failures.push(VideoFailure {
                    task,
                    stage: Stage::Decode,
                    error: e.to_string(),
                });
            }
        }
    }
    summary.videos_decoded = decoded.len();

    // ---- Retention pass ----
    let retention_pool = build_pool(config.retention_jobs, "retention")?;
    let retention_results: Vec<CoreResult<RetentionReport>> = retention_pool.install(|| {
        decoded
            .par_iter()
            .map(|(task, frames_dir)| {
                retain_frames(
                    oracle,
                    frames_dir,
                    &task.output_dir,
                    config.threshold,
                    config.on_oracle_error,
                )
            })
            .collect()
    });

    for ((task, frames_dir), result) in decoded.into_iter().zip(retention_results) {
        match result {
            Ok(report) => {
                log::info!(
                    "Video {} ({}): kept {} of {} frame(s)",
                    task.index,
                    task.source_path.display(),
                    report.retained,
                    report.frames_seen
                );
                summary.completed.push(VideoResult {
                    task,
                    frames_dir,
                    report,
                });
            }
            Err(e) => {
                log::error!(
                    "Retention for video {} ({}) failed: {}",
                    task.index,
                    task.source_path.display(),
                    e
                );
                summary.failures.push(VideoFailure {
                    task,
                    stage: Stage::Retention,
                    error: e.to_string(),
                });
            }
        }
    }

    summary.failures.sort_by_key(|f| f.task.index);
    summary.elapsed = started.elapsed();
    Ok(summary)
}

/// Runs the pipeline with ffmpeg as the decoder and the HTTP oracle at
/// `config.oracle_addr`.
pub fn run_default(config: &CoreConfig) -> CoreResult<PipelineSummary> {
    config.validate()?;
    let transport = HttpOracleTransport::new(&config.oracle_addr, config.oracle_timeout)?;
    let oracle = OracleClient::new(transport);
    run(config, &SidecarSpawner, &oracle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_tasks_assigns_index_directories() {
        let tasks = plan_tasks(
            vec![PathBuf::from("a.mp4"), PathBuf::from("b.mp4")],
            Path::new("/out"),
        );

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].video_id, "0");
        assert_eq!(tasks[0].output_dir, PathBuf::from("/out/0"));
        assert_eq!(tasks[1].frames_dir(), PathBuf::from("/out/1/frames"));
        assert_eq!(tasks[1].source_path, PathBuf::from("b.mp4"));
    }

    #[test]
    fn test_summary_totals() {
        let task = VideoTask::new(0, PathBuf::from("a.mp4"), Path::new("/out"));
        let summary = PipelineSummary {
            completed: vec![
                VideoResult {
                    task: task.clone(),
                    frames_dir: task.frames_dir(),
                    report: RetentionReport {
                        frames_seen: 4,
                        retained: 1,
                        ..Default::default()
                    },
                },
                VideoResult {
                    task: task.clone(),
                    frames_dir: task.frames_dir(),
                    report: RetentionReport {
                        frames_seen: 2,
                        retained: 2,
                        ..Default::default()
                    },
                },
            ],
            ..Default::default()
        };
        assert_eq!(summary.frames_seen(), 6);
        assert_eq!(summary.frames_retained(), 3);
    }
}
