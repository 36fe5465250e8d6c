//! Core library for extracting keyframes from videos and discarding static frames.
//!
//! Each listed video is sampled into stills with ffmpeg; every still is then
//! scored by a remote similarity oracle and only the stills scoring below the
//! threshold are kept.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use framesieve_core::{CoreConfig, run_default};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(
//!     PathBuf::from("/data/videos.txt"),
//!     PathBuf::from("/data/keyframes"),
//!     0.8,
//!     "127.0.0.1:9000",
//! );
//! config.validate().unwrap();
//!
//! let summary = run_default(&config).unwrap();
//! for result in &summary.completed {
//!     println!(
//!         "{}: kept {} of {} frames",
//!         result.task.source_path.display(),
//!         result.report.retained,
//!         result.report.frames_seen
//!     );
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod frame_store;
pub mod oracle;
pub mod processing;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder, OracleFailurePolicy};
pub use discovery::read_video_list;
pub use error::{CoreError, CoreResult};
pub use external::check_dependency;
pub use oracle::{HttpOracleTransport, OracleClient, OracleTransport, ScoreResult};
pub use processing::{
    PipelineSummary, RetentionReport, Stage, VideoFailure, VideoResult, VideoTask, run, run_default,
};
pub use utils::{format_duration, percentage};
