// ============================================================================
// framesieve-core/src/oracle/mod.rs
// ============================================================================
//
// SIMILARITY ORACLE: Client for the Remote Frame Scoring Service
//
// The oracle decides whether a frame is static, i.e. visually redundant with
// what it has already seen for the same video, and reports a similarity
// score. This module adapts an in-process call into a remote request.
//
// KEY COMPONENTS:
// - OracleTransport: Trait for the request/response round trip
// - OracleClient: Applies local policy (empty frames) in front of a transport
// - HttpOracleTransport: JSON-over-HTTP transport built on reqwest
//
// DESIGN:
// The client is an ordinary value constructed once at startup and passed by
// reference to whoever needs it. Transports must be `Send + Sync` so one
// client can serve several retention workers.
//
// AI-ASSISTANT-INFO: Similarity oracle client and transport abstraction

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- External crate imports ----
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde::{Deserialize, Serialize, Serializer};

// ============================================================================
// SUBMODULES
// ============================================================================

/// JSON-over-HTTP transport
pub mod http;

/// Scripted transport for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

pub use http::HttpOracleTransport;

// ============================================================================
// WIRE TYPES
// ============================================================================

/// Oracle verdict for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    #[serde(alias = "isStatic")]
    pub is_static: bool,
    pub score: f64,
}

impl ScoreResult {
    /// Verdict for frames that were never sent to the oracle.
    pub const NOT_STATIC: ScoreResult = ScoreResult {
        is_static: false,
        score: 0.0,
    };
}

/// Request body: which video the frame belongs to, and the frame itself.
#[derive(Debug, Serialize)]
pub struct FrameArgs<'a> {
    pub video_id: &'a str,
    pub frame: FramePayload<'a>,
}

/// A single frame as sent to the oracle.
#[derive(Debug, Serialize)]
pub struct FramePayload<'a> {
    pub id: i64,
    #[serde(serialize_with = "serialize_base64")]
    pub content: &'a [u8],
}

fn serialize_base64<S: Serializer>(content: &&[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64_STANDARD.encode(content))
}

// ============================================================================
// TRANSPORT ABSTRACTION
// ============================================================================

/// Performs one scoring round trip against the oracle.
pub trait OracleTransport: Send + Sync {
    fn is_static_video(&self, args: &FrameArgs<'_>) -> CoreResult<ScoreResult>;
}

// ============================================================================
// CLIENT
// ============================================================================

/// Client for the similarity oracle.
///
/// # Examples
///
/// ```rust,no_run
/// use framesieve_core::oracle::{HttpOracleTransport, OracleClient};
/// use std::time::Duration;
///
/// let transport = HttpOracleTransport::new("127.0.0.1:9000", Duration::from_secs(30)).unwrap();
/// let client = OracleClient::new(transport);
///
/// let frame = std::fs::read("/data/0/frames/0000000001.png").unwrap();
/// let result = client.query_is_static("/data/0/frames", 0, &frame).unwrap();
/// println!("static={} score={}", result.is_static, result.score);
/// ```
#[derive(Debug)]
pub struct OracleClient<T: OracleTransport> {
    transport: T,
}

impl<T: OracleTransport> OracleClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Asks the oracle whether `content` is a static frame of `video_id`.
    ///
    /// Empty content is never static and never reaches the transport. A
    /// failure means the similarity is unknown; it does not mean the frame
    /// is unique, and callers must decide what to do with it.
    pub fn query_is_static(
        &self,
        video_id: &str,
        frame_id: i64,
        content: &[u8],
    ) -> CoreResult<ScoreResult> {
        if content.is_empty() {
            log::debug!("Frame {} of {} is empty, not querying oracle", frame_id, video_id);
            return Ok(ScoreResult::NOT_STATIC);
        }

        let args = FrameArgs {
            video_id,
            frame: FramePayload {
                id: frame_id,
                content,
            },
        };

        let result = self.transport.is_static_video(&args).inspect_err(|e| {
            log::error!("Oracle is_static failed for {} frame {}: {}", video_id, frame_id, e);
        })?;

        if !result.score.is_finite() {
            return Err(CoreError::OracleResponse(format!(
                "non-finite score {} for {} frame {}",
                result.score, video_id, frame_id
            )));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::MockOracleTransport;
    use super::*;

    #[test]
    fn test_empty_content_short_circuits() {
        let transport = MockOracleTransport::new();
        transport.fail_all();
        let client = OracleClient::new(transport);

        let result = client.query_is_static("video", 3, &[]).unwrap();
        assert_eq!(result, ScoreResult::NOT_STATIC);
        assert!(client.transport().received_calls().is_empty());
    }

    #[test]
    fn test_forwards_ids_and_content() {
        let transport = MockOracleTransport::with_scores(vec![0.7]);
        let client = OracleClient::new(transport);

        let result = client.query_is_static("/out/0/frames", 0, b"pixels").unwrap();
        assert_eq!(result.score, 0.7);

        let calls = client.transport().received_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].video_id, "/out/0/frames");
        assert_eq!(calls[0].frame_id, 0);
        assert_eq!(calls[0].content, b"pixels".to_vec());
    }

    #[test]
    fn test_transport_error_propagates() {
        let transport = MockOracleTransport::new();
        transport.fail_frame(0);
        let client = OracleClient::new(transport);

        let result = client.query_is_static("video", 0, b"pixels");
        assert!(matches!(result, Err(CoreError::OracleRequest(_))));
    }

    #[test]
    fn test_non_finite_score_is_rejected() {
        let transport = MockOracleTransport::with_scores(vec![f64::NAN]);
        let client = OracleClient::new(transport);

        let result = client.query_is_static("video", 0, b"pixels");
        assert!(matches!(result, Err(CoreError::OracleResponse(_))));
    }

    #[test]
    fn test_request_body_encodes_content_as_base64() {
        let args = FrameArgs {
            video_id: "v",
            frame: FramePayload {
                id: 4,
                content: b"abc",
            },
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"video_id": "v", "frame": {"id": 4, "content": "YWJj"}})
        );
    }

    #[test]
    fn test_response_accepts_camel_case() {
        let result: ScoreResult =
            serde_json::from_str(r#"{"isStatic": true, "score": 0.93}"#).unwrap();
        assert!(result.is_static);
        assert_eq!(result.score, 0.93);
    }
}
