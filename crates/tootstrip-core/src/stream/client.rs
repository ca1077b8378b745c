use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use tracing::info;

use super::{Frame, FrameStream, StreamError, StreamErrorKind, StreamResult, USER_AGENT};

/// Boxed stream of transport frames.
pub type FrameSource = BoxStream<'static, StreamResult<Frame>>;

/// Path of the local public timeline stream on a Mastodon instance.
const STREAMING_PATH: &str = "/api/v1/streaming/public/local";

/// Connection settings for the streaming transport.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Instance base URL, e.g. `https://imastodon.net`.
    pub base_url: String,
    /// Bearer token supplied on the command line.
    pub access_token: String,
}

/// Streaming API client.
///
/// Owns the HTTP connection lifecycle; decode and display never touch the
/// network. One `connect` yields one long-lived frame stream, and any error
/// on it is terminal for that connection.
pub struct StreamClient {
    config: StreamConfig,
    http: reqwest::Client,
}

impl StreamClient {
    /// Creates a new streaming client with the given configuration.
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Opens the event-stream connection and returns the frame stream.
    ///
    /// # Errors
    /// Returns a [`StreamError`] if the connection cannot be established or
    /// the server answers with a non-success status.
    pub async fn connect(&self) -> StreamResult<FrameSource> {
        let url = format!("{}{STREAMING_PATH}", self.config.base_url.trim_end_matches('/'));
        let url = url::Url::parse(&url).map_err(|e| {
            StreamError::new(StreamErrorKind::Connect, format!("invalid stream URL {url}: {e}"))
        })?;
        info!(url = %url, "opening event stream");

        let response = self
            .http
            .get(url)
            .header("accept", "text/event-stream")
            .header("user-agent", USER_AGENT)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| StreamError::new(StreamErrorKind::Connect, format!("connect: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(StreamError::http_status(status.as_u16(), &error_body));
        }

        Ok(FrameStream::new(response.bytes_stream()).boxed())
    }
}
