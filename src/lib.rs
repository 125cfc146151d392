//! Rewriting forward proxy.
//!
//! Fetches an arbitrary target URL and, when the answer is HTML, rewrites
//! its links, resources, form actions and inline background images so
//! follow-up requests come back through `/api/proxy`. Lets an embedding
//! frame browse third-party sites while all traffic stays same-origin.
//!
//! ```text
//! GET /api/proxy?url=example.com
//!     → upstream::target   (https:// prefix, validation)
//!     → upstream::client   (single GET, 15s deadline)
//!     → upstream::dispatch (text/html? → rewrite : passthrough)
//!     → http::response     (Content-Type only, structured errors)
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rewrite;
pub mod upstream;

pub use config::ProxyConfig;
pub use error::{ProxyError, ProxyResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use rewrite::{rewrite_html, RewriteContext};
pub use upstream::{Fetcher, NormalizedUrl};
