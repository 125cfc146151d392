//! Target URL normalization.
//!
//! Mirrors the address-bar heuristic of prefixing `https://` to scheme-less
//! input, without any search fallback. Construction fails instead of
//! defaulting, so nothing downstream ever sees an unparsable target.

use std::borrow::Cow;
use std::fmt;

use serde::Deserialize;
use url::Url;

use crate::error::{ProxyError, ProxyResult};

/// A validated absolute URL, safe to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl(Url);

impl NormalizedUrl {
    /// Normalize caller-supplied input into an absolute URL.
    ///
    /// Input already starting with `http://` or `https://` is parsed as-is;
    /// anything else gets `https://` prepended first.
    pub fn parse(raw: &str) -> ProxyResult<Self> {
        let candidate = if raw.starts_with("http://") || raw.starts_with("https://") {
            Cow::Borrowed(raw)
        } else {
            Cow::Owned(format!("https://{raw}"))
        };

        Url::parse(&candidate)
            .map(Self)
            .map_err(|e| ProxyError::InvalidUrl {
                input: raw.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Url> for NormalizedUrl {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Query string accepted by the proxy and asset routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetQuery {
    pub url: Option<String>,
}

impl TargetQuery {
    /// Resolve the requested target, failing before any network I/O.
    pub fn target(&self) -> ProxyResult<NormalizedUrl> {
        match self.url.as_deref() {
            None | Some("") => Err(ProxyError::MissingParameter),
            Some(raw) => NormalizedUrl::parse(raw),
        }
    }
}
