//! Streaming transport: long-lived SSE connection to a Mastodon instance.

use std::fmt;

mod client;
mod sse;

pub use client::{FrameSource, StreamClient, StreamConfig};
pub use sse::FrameStream;

/// Standard User-Agent header for tootstrip API requests.
pub const USER_AGENT: &str = concat!("tootstrip/", env!("CARGO_PKG_VERSION"));

/// One named frame delivered by the event stream.
///
/// Only `event` and `data` are consumed by the decoder; `id` is carried
/// for completeness of the SSE protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Last-event-id, if the server sent one.
    pub id: Option<String>,
    /// Event name (`update`, `delete`, ...). Defaults to `message` per SSE.
    pub event: String,
    /// Raw UTF-8 payload text.
    pub data: String,
}

/// Categories of transport errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamErrorKind {
    /// Could not establish the connection (DNS, TLS, refused).
    Connect,
    /// Server answered with a non-success HTTP status (4xx, 5xx).
    HttpStatus,
    /// The event stream itself broke mid-connection.
    Protocol,
}

impl fmt::Display for StreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamErrorKind::Connect => write!(f, "connect"),
            StreamErrorKind::HttpStatus => write!(f, "http_status"),
            StreamErrorKind::Protocol => write!(f, "protocol"),
        }
    }
}

/// Structured transport error with kind and details.
///
/// Terminal for the current connection: the core never retries. Whether to
/// reconnect is the caller's decision.
#[derive(Debug, Clone)]
pub struct StreamError {
    /// Error category
    pub kind: StreamErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl StreamError {
    /// Creates a new transport error.
    pub fn new(kind: StreamErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an HTTP status error, pulling a cleaner message out of a
    /// JSON error body when the server provides one.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = format!("HTTP {status}");
        let details = if body.is_empty() {
            None
        } else {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(body)
                && let Some(msg) = json.get("error").and_then(|v| v.as_str())
            {
                return Self {
                    kind: StreamErrorKind::HttpStatus,
                    message: format!("HTTP {status}: {msg}"),
                    details: Some(body.to_string()),
                };
            }
            Some(body.to_string())
        };
        Self {
            kind: StreamErrorKind::HttpStatus,
            message,
            details,
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StreamError {}

/// Result type for transport operations.
pub type StreamResult<T> = std::result::Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_extracts_json_error_message() {
        let err = StreamError::http_status(401, r#"{"error":"The access token is invalid"}"#);
        assert_eq!(err.kind, StreamErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 401: The access token is invalid");
        assert!(err.details.is_some());
    }

    #[test]
    fn test_http_status_plain_body() {
        let err = StreamError::http_status(502, "bad gateway");
        assert_eq!(err.message, "HTTP 502");
        assert_eq!(err.details.as_deref(), Some("bad gateway"));
    }

    #[test]
    fn test_http_status_empty_body() {
        let err = StreamError::http_status(500, "");
        assert_eq!(err.message, "HTTP 500");
        assert!(err.details.is_none());
    }
}
