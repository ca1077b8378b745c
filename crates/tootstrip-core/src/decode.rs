//! Typed decode of timeline frames.
//!
//! A frame payload is JSON with a nested `account` object and a `content`
//! markup string. Extraction is schema-checked field by field so a failure
//! names the offending field instead of surfacing a generic serde path.

use std::fmt;

use serde_json::Value;

use crate::stream::Frame;
use crate::text;

/// Author of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub display_name: String,
    /// Avatar image URL; carried for the presenter, never fetched here.
    pub avatar: String,
}

/// One decoded timeline post. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub account: Account,
    /// Raw HTML markup as delivered by the instance.
    pub content: String,
}

impl Post {
    /// Display text: markup stripped, entities resolved, newlines trimmed.
    ///
    /// Computed on demand; the raw `content` stays untouched.
    pub fn plain_text(&self) -> String {
        text::strip_markup(&self.content)
    }
}

/// Why a frame payload failed to decode.
///
/// Decode failures are per-frame and recoverable: the frame is dropped and
/// the stream keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload is not valid JSON text.
    MalformedPayload(String),
    /// JSON parsed but a required field is missing or mistyped.
    SchemaMismatch(&'static str),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MalformedPayload(detail) => write!(f, "malformed payload: {detail}"),
            DecodeError::SchemaMismatch(field) => {
                write!(f, "schema mismatch: missing or mistyped field `{field}`")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Filter for the single recognized event name.
#[derive(Debug, Clone)]
pub struct EventFilter {
    event: String,
}

impl EventFilter {
    /// Event name carried by new-post frames on Mastodon streams.
    pub const UPDATE: &'static str = "update";

    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
        }
    }

    /// Decodes a frame if its event name matches the filter.
    ///
    /// Non-matching frames yield `None`: they reach neither the success nor
    /// the error path. Decode itself is pure, so feeding the same frame
    /// twice yields the same outcome both times.
    pub fn decode(&self, frame: &Frame) -> Option<Result<Post, DecodeError>> {
        if frame.event != self.event {
            return None;
        }
        Some(decode_post(&frame.data))
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::new(Self::UPDATE)
    }
}

/// Decodes one `update` payload into a [`Post`].
///
/// # Errors
/// [`DecodeError::MalformedPayload`] if the payload is not JSON;
/// [`DecodeError::SchemaMismatch`] naming the first missing/mistyped field.
pub fn decode_post(raw: &str) -> Result<Post, DecodeError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| DecodeError::MalformedPayload(e.to_string()))?;

    let account = value
        .get("account")
        .filter(|v| v.is_object())
        .ok_or(DecodeError::SchemaMismatch("account"))?;

    let account = Account {
        username: string_field(account, "username")?,
        display_name: string_field(account, "display_name")?,
        avatar: string_field(account, "avatar")?,
    };

    let content = string_field(&value, "content")?;

    Ok(Post { account, content })
}

fn string_field(value: &Value, field: &'static str) -> Result<String, DecodeError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(DecodeError::SchemaMismatch(field))
}
