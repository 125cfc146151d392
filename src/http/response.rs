//! Response shaping.
//!
//! # Responsibilities
//! - Map `ProxyError` to status codes and error bodies
//! - Forward upstream non-2xx statuses verbatim
//! - Emit only `Content-Type` from the upstream, never its other headers
//!
//! # Design Decisions
//! - The proxy route speaks JSON errors (`{"error", "status"}`)
//! - The asset route speaks plain-text errors
//! - Rewritten HTML is always labelled UTF-8

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ProxyError;
use crate::upstream::dispatch::HTML_CONTENT_TYPE;
use crate::upstream::{ProxyBody, UpstreamResponse};

/// Structured error payload of the proxy route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}

fn json_error(status: StatusCode, error: String) -> Response {
    (
        status,
        Json(ErrorBody {
            error,
            status: status.as_u16(),
        }),
    )
        .into_response()
}

/// Human-readable message for the JSON error body.
pub fn error_message(err: &ProxyError) -> String {
    match err {
        ProxyError::MissingParameter => "URL parameter is required".to_string(),
        ProxyError::InvalidUrl { .. } => "Invalid URL format".to_string(),
        other => format!("Proxy error: {other}"),
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        json_error(self.status_code(), error_message(&self))
    }
}

/// `ProxyError` rendered in the asset route's plain-text shape.
#[derive(Debug)]
pub struct AssetError(pub ProxyError);

impl IntoResponse for AssetError {
    fn into_response(self) -> Response {
        let message = match self.0 {
            ProxyError::MissingParameter => "Missing URL parameter",
            ProxyError::InvalidUrl { .. } => "Invalid URL format",
            _ => "Failed to fetch asset",
        };
        (self.0.status_code(), message).into_response()
    }
}

/// Upstream non-2xx status, JSON shape.
pub fn upstream_failure_json(upstream: &UpstreamResponse) -> Response {
    json_error(
        upstream.status,
        format!("Failed to fetch: {}", upstream.status_text),
    )
}

/// Upstream non-2xx status, plain-text shape.
pub fn upstream_failure_text(upstream: &UpstreamResponse) -> Response {
    (upstream.status, format!("Error: {}", upstream.status_text)).into_response()
}

impl IntoResponse for ProxyBody {
    fn into_response(self) -> Response {
        match self {
            ProxyBody::Html(html) => (
                [(CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE))],
                html,
            )
                .into_response(),
            ProxyBody::Passthrough { content_type, body } => {
                let mut response = Response::new(Body::from(body));
                if let Some(content_type) = content_type {
                    response.headers_mut().insert(CONTENT_TYPE, content_type);
                }
                response
            }
        }
    }
}
