//! Error kinds surfaced by the proxy core.
//!
//! `MissingParameter` and `InvalidUrl` are raised before any network I/O.
//! An upstream answering with a non-2xx status is not an error here: the
//! handlers forward it as data.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while serving a proxy request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The `url` query parameter was absent or empty.
    #[error("URL parameter is required")]
    MissingParameter,

    /// The target did not parse as an absolute URL after scheme normalization.
    #[error("invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    /// DNS lookup for the target host failed.
    #[error("host not found: {0}")]
    HostNotFound(String),

    /// Connection to the origin could not be established or was dropped.
    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// Origin did not answer within the configured deadline.
    #[error("upstream timed out after {0} seconds")]
    UpstreamTimeout(u64),

    /// Anything unexpected.
    #[error("internal failure: {0}")]
    InternalFailure(String),
}

/// Result type for proxy operations.
pub type ProxyResult<T> = Result<T, ProxyError>;

impl ProxyError {
    /// HTTP status the error maps to at the request boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingParameter | ProxyError::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
            ProxyError::HostNotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::UpstreamUnreachable(_)
            | ProxyError::UpstreamTimeout(_)
            | ProxyError::InternalFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::MissingParameter => "missing_parameter",
            ProxyError::InvalidUrl { .. } => "invalid_url",
            ProxyError::HostNotFound(_) => "host_not_found",
            ProxyError::UpstreamUnreachable(_) => "upstream_unreachable",
            ProxyError::UpstreamTimeout(_) => "upstream_timeout",
            ProxyError::InternalFailure(_) => "internal_failure",
        }
    }

    /// True for failures detected before the outbound fetch.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error() && !matches!(self, ProxyError::HostNotFound(_))
    }
}
