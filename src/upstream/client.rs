//! Outbound HTTP client with bounded deadlines.
//!
//! # Responsibilities
//! - Issue a single GET per request with a spoofed desktop user agent
//! - Enforce connect and total timeouts
//! - Classify transport failures (DNS, connect, timeout)
//!
//! # Design Decisions
//! - No retries: an interactive session reloads manually
//! - Non-2xx answers are data, not errors; their bodies are not read
//! - One shared client so connections are pooled across requests

use std::error::Error as StdError;
use std::time::{Duration, Instant};

use hyper::ext::ReasonPhrase;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::redirect::Policy;

use crate::config::UpstreamConfig;
use crate::error::{ProxyError, ProxyResult};
use crate::upstream::target::NormalizedUrl;
use crate::upstream::types::UpstreamResponse;

/// Fetches targets on behalf of the proxy routes.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    user_agent: String,
    timeout: Duration,
}

impl Fetcher {
    /// Build a fetcher from upstream settings.
    pub fn new(config: &UpstreamConfig) -> ProxyResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .redirect(Policy::limited(config.max_redirects))
            .no_proxy()
            .build()
            .map_err(|e| ProxyError::InternalFailure(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            timeout,
        })
    }

    /// Fetch the target once.
    pub async fn fetch(&self, target: &NormalizedUrl) -> ProxyResult<UpstreamResponse> {
        let start = Instant::now();
        let response = self
            .client
            .get(target.as_url().clone())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| self.classify(target, e))?;

        let status = response.status();
        let status_text =
            UpstreamResponse::reason_phrase(status, response.extensions().get::<ReasonPhrase>());
        let url = response.url().clone();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();

        if !status.is_success() {
            tracing::debug!(
                target_url = %target,
                status = %status,
                "Upstream answered with non-success status"
            );
            return Ok(UpstreamResponse {
                status,
                status_text,
                content_type,
                body: Default::default(),
                url,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ProxyError::UpstreamTimeout(self.timeout.as_secs())
            } else {
                ProxyError::InternalFailure(format!("failed to read upstream body: {e}"))
            }
        })?;

        tracing::debug!(
            target_url = %target,
            final_url = %url,
            status = %status,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream fetch complete"
        );

        Ok(UpstreamResponse {
            status,
            status_text,
            content_type,
            body,
            url,
        })
    }

    fn classify(&self, target: &NormalizedUrl, err: reqwest::Error) -> ProxyError {
        if err.is_timeout() {
            return ProxyError::UpstreamTimeout(self.timeout.as_secs());
        }
        if is_dns_failure(&err) {
            let host = target.as_url().host_str().unwrap_or_default().to_string();
            return ProxyError::HostNotFound(host);
        }
        if err.is_connect() || err.is_request() || err.is_redirect() {
            return ProxyError::UpstreamUnreachable(error_chain(&err));
        }
        ProxyError::InternalFailure(error_chain(&err))
    }
}

/// True when the failure originated in name resolution.
fn is_dns_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.to_string().contains("dns error") {
            return true;
        }
        current = e.source();
    }
    false
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(e) = current {
        message.push_str(": ");
        message.push_str(&e.to_string());
        current = e.source();
    }
    message
}
