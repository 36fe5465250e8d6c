// framesieve-core/src/oracle/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::{FrameArgs, OracleTransport, ScoreResult};
use crate::error::{CoreError, CoreResult};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// A request as seen by the mock transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub video_id: String,
    pub frame_id: i64,
    pub content: Vec<u8>,
}

/// Deterministic oracle: scores are looked up by frame id.
///
/// Per-video score lists take precedence over the default list. Frame ids
/// past the end of a list score 0.0. A frame is reported static when its
/// score is at least 0.5.
#[derive(Debug, Default)]
pub struct MockOracleTransport {
    default_scores: Mutex<Vec<f64>>,
    video_scores: Mutex<HashMap<String, Vec<f64>>>,
    failing_frames: Mutex<HashSet<i64>>,
    fail_everything: Mutex<bool>,
    calls: Mutex<Vec<RecordedQuery>>,
}

impl MockOracleTransport {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_scores(scores: Vec<f64>) -> Self {
        let transport = Self::new();
        *transport.default_scores.lock().unwrap() = scores;
        transport
    }

    pub fn set_scores_for(&self, video_id: &str, scores: Vec<f64>) {
        self.video_scores
            .lock()
            .unwrap()
            .insert(video_id.to_string(), scores);
    }

    /// Makes every query for `frame_id` fail.
    pub fn fail_frame(&self, frame_id: i64) {
        self.failing_frames.lock().unwrap().insert(frame_id);
    }

    /// Makes every query fail.
    pub fn fail_all(&self) {
        *self.fail_everything.lock().unwrap() = true;
    }

    pub fn received_calls(&self) -> Vec<RecordedQuery> {
        self.calls.lock().unwrap().clone()
    }

    /// Frame ids queried for `video_id`, in call order.
    pub fn frame_ids_for(&self, video_id: &str) -> Vec<i64> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.video_id == video_id)
            .map(|c| c.frame_id)
            .collect()
    }
}

impl OracleTransport for MockOracleTransport {
    fn is_static_video(&self, args: &FrameArgs<'_>) -> CoreResult<ScoreResult> {
        self.calls.lock().unwrap().push(RecordedQuery {
            video_id: args.video_id.to_string(),
            frame_id: args.frame.id,
            content: args.frame.content.to_vec(),
        });

        if *self.fail_everything.lock().unwrap()
            || self.failing_frames.lock().unwrap().contains(&args.frame.id)
        {
            return Err(CoreError::OracleRequest(format!(
                "mock oracle unavailable for {} frame {}",
                args.video_id, args.frame.id
            )));
        }

        let index = usize::try_from(args.frame.id).unwrap_or(usize::MAX);
        let score = match self.video_scores.lock().unwrap().get(args.video_id) {
            Some(scores) => scores.get(index).copied(),
            None => self.default_scores.lock().unwrap().get(index).copied(),
        }
        .unwrap_or(0.0);

        Ok(ScoreResult {
            is_static: score >= 0.5,
            score,
        })
    }
}
