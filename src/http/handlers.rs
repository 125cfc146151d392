//! Route handlers.
//!
//! Every failure is turned into a structured response here; nothing
//! propagates past this boundary as a fault.

use std::time::Instant;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{ProxyError, ProxyResult};
use crate::http::response::{upstream_failure_json, upstream_failure_text, AssetError};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::rewrite::PROXY_ENDPOINT;
use crate::upstream::{dispatch, passthrough, NormalizedUrl, TargetQuery, UpstreamResponse};

pub const PROXY_ROUTE: &str = PROXY_ENDPOINT;
pub const ASSET_ROUTE: &str = "/api/asset";
pub const HEALTH_ROUTE: &str = "/health";

type TargetParams = Result<Query<TargetQuery>, QueryRejection>;

fn resolve_target(params: &TargetParams) -> ProxyResult<NormalizedUrl> {
    match params {
        Ok(Query(query)) => query.target(),
        // `url` given more than once is not a single target.
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Unusable query string");
            Err(ProxyError::MissingParameter)
        }
    }
}

/// Fetch the target, bailing out before any I/O on a bad query.
async fn fetch_target(state: &AppState, params: &TargetParams) -> ProxyResult<UpstreamResponse> {
    let target = resolve_target(params)?;
    tracing::debug!(target_url = %target, "Fetching target");
    state.fetcher.fetch(&target).await
}

fn log_failure(route: &'static str, err: &ProxyError) {
    if err.is_client_error() {
        tracing::warn!(route, kind = err.kind(), error = %err, "Rejected request");
    } else {
        metrics::record_upstream_failure(err.kind());
        tracing::error!(route, kind = err.kind(), error = %err, "Proxy request failed");
    }
}

/// `GET /api/proxy?url=...`: rewrite HTML, pass everything else through.
pub async fn proxy(State(state): State<AppState>, params: TargetParams) -> Response {
    let start = Instant::now();

    let response = match fetch_target(&state, &params).await {
        Ok(upstream) if upstream.is_success() => dispatch(upstream).into_response(),
        Ok(upstream) => {
            tracing::info!(status = %upstream.status, url = %upstream.url, "Forwarding upstream status");
            upstream_failure_json(&upstream)
        }
        Err(err) => {
            log_failure(PROXY_ROUTE, &err);
            err.into_response()
        }
    };

    metrics::record_request(PROXY_ROUTE, response.status().as_u16(), start);
    response
}

/// `GET /api/asset?url=...`: passthrough only, plain-text errors.
pub async fn asset(State(state): State<AppState>, params: TargetParams) -> Response {
    let start = Instant::now();

    let response = match fetch_target(&state, &params).await {
        Ok(upstream) if upstream.is_success() => passthrough(upstream).into_response(),
        Ok(upstream) => {
            tracing::info!(status = %upstream.status, url = %upstream.url, "Forwarding upstream status");
            upstream_failure_text(&upstream)
        }
        Err(err) => {
            log_failure(ASSET_ROUTE, &err);
            AssetError(err).into_response()
        }
    };

    metrics::record_request(ASSET_ROUTE, response.status().as_u16(), start);
    response
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health`: liveness check.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
