//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, fetcher and rewriter produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line via the trace span
//! - Metrics are cheap when no recorder is installed

pub mod logging;
pub mod metrics;
