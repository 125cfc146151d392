//! Content-type branching between passthrough and HTML rewriting.

use axum::body::Bytes;
use axum::http::HeaderValue;

use crate::observability::metrics;
use crate::rewrite::{rewrite_html, RewriteContext};
use crate::upstream::types::UpstreamResponse;

/// Content type sent with every rewritten document.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Body ready to be written back to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyBody {
    /// Rewritten HTML document.
    Html(String),
    /// Upstream bytes and declared content type, untouched.
    Passthrough {
        content_type: Option<HeaderValue>,
        body: Bytes,
    },
}

/// Case-insensitive `text/html` substring check.
pub fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

/// Forward the upstream body without inspecting it.
pub fn passthrough(upstream: UpstreamResponse) -> ProxyBody {
    ProxyBody::Passthrough {
        content_type: upstream.content_type,
        body: upstream.body,
    }
}

/// Rewrite HTML, pass everything else through byte-for-byte.
pub fn dispatch(upstream: UpstreamResponse) -> ProxyBody {
    if !is_html(upstream.content_type_str()) {
        return passthrough(upstream);
    }

    let html = String::from_utf8_lossy(&upstream.body);
    let ctx = RewriteContext::new(upstream.url.into());
    let rewritten = rewrite_html(&html, &ctx);

    tracing::debug!(
        base_url = %ctx.base_url(),
        bytes_in = upstream.body.len(),
        bytes_out = rewritten.len(),
        "Rewrote HTML document"
    );
    metrics::record_rewrite();

    ProxyBody::Html(rewritten)
}
