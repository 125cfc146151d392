//! Data carried out of the fetch step.

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};
use hyper::ext::ReasonPhrase;
use url::Url;

/// Raw result of fetching a target. Consumed once by dispatch.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Status returned by the origin.
    pub status: StatusCode,
    /// Reason phrase exactly as the origin sent it.
    pub status_text: String,
    /// Declared `Content-Type`, if any.
    pub content_type: Option<HeaderValue>,
    /// Full body. Empty when the origin answered with a non-2xx status.
    pub body: Bytes,
    /// Final URL after redirects.
    pub url: Url,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Reason phrase for a status, preferring the one the origin sent.
    pub fn reason_phrase(status: StatusCode, sent: Option<&ReasonPhrase>) -> String {
        sent.and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
            .or_else(|| status.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string()
    }

    /// Content type as text; empty when absent or not visible ASCII.
    pub fn content_type_str(&self) -> &str {
        self.content_type
            .as_ref()
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}
