//! Pipeline stages and the driver that sequences them.
//!
//! - `decode`: video to numbered stills via ffmpeg
//! - `retention`: stills to the filtered set of non-static frames
//! - `pipeline`: video list to per-video decode and retention, with reporting

pub mod decode;
pub mod pipeline;
pub mod retention;

pub use decode::{build_decode_command, decode_all};
pub use pipeline::{
    PipelineSummary, Stage, VideoFailure, VideoResult, VideoTask, plan_tasks, run, run_default,
};
pub use retention::{Frame, RetentionReport, is_duplicate, retain_frames};
