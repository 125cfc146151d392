//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy, asset and health routes
//! - Wire up middleware (request ID, tracing, concurrency, timeout, panics)
//! - Serve on a listener until shutdown is signalled

use std::any::Any;
use std::time::Duration;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::error::{ProxyError, ProxyResult};
use crate::http::handlers::{self, ASSET_ROUTE, HEALTH_ROUTE, PROXY_ROUTE};
use crate::http::request;
use crate::upstream::Fetcher;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Fetcher,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> ProxyResult<Self> {
        let state = AppState {
            fetcher: Fetcher::new(&config.upstream)?,
        };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route(PROXY_ROUTE, get(handlers::proxy))
            .route(ASSET_ROUTE, get(handlers::asset))
            .route(HEALTH_ROUTE, get(handlers::health))
            .with_state(state)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            // One semaphore shared by every route.
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(request::propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(request::make_span))
            .layer(request::set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_connections = self.config.listener.max_connections,
            upstream_timeout_secs = self.config.upstream.timeout_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Request handler panicked");
    ProxyError::InternalFailure("request handler panicked".to_string()).into_response()
}
