//! JSON-over-HTTP oracle transport.
//!
//! `POST <addr>/is_static` with `{"video_id", "frame": {"id", "content"}}`,
//! frame content base64 encoded. The reply is `{"is_static", "score"}`.

use super::{FrameArgs, OracleTransport, ScoreResult};
use crate::error::{CoreError, CoreResult};

use reqwest::blocking::Client;
use std::time::Duration;

const IS_STATIC_PATH: &str = "is_static";

/// Oracle transport over blocking HTTP.
#[derive(Debug, Clone)]
pub struct HttpOracleTransport {
    client: Client,
    endpoint: String,
}

impl HttpOracleTransport {
    /// Builds a transport for `addr` (`host:port` or a full URL).
    ///
    /// `timeout` bounds each round trip, connection setup included. No
    /// connection is made until the first request.
    pub fn new(addr: &str, timeout: Duration) -> CoreResult<Self> {
        let endpoint = endpoint_url(addr)?;
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build oracle HTTP client: {e}")))?;

        log::debug!("Oracle endpoint: {}", endpoint);
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl OracleTransport for HttpOracleTransport {
    fn is_static_video(&self, args: &FrameArgs<'_>) -> CoreResult<ScoreResult> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(args)
            .send()?
            .error_for_status()?;

        Ok(response.json::<ScoreResult>()?)
    }
}

fn endpoint_url(addr: &str) -> CoreResult<String> {
    let addr = addr.trim();
    if addr.is_empty() {
        return Err(CoreError::Config("oracle address must not be empty".to_string()));
    }

    let base = if addr.starts_with("http://") || addr.starts_with("https://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    };

    Ok(format!("{}/{}", base.trim_end_matches('/'), IS_STATIC_PATH))
}
