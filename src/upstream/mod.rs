//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! ?url=<raw>
//!     → target.rs (scheme normalization, validation)
//!     → client.rs (single bounded GET)
//!     → dispatch.rs (HTML → rewrite, anything else → passthrough)
//!     → ProxyBody
//! ```

pub mod client;
pub mod dispatch;
pub mod target;
pub mod types;

pub use client::Fetcher;
pub use dispatch::{dispatch, passthrough, ProxyBody};
pub use target::{NormalizedUrl, TargetQuery};
pub use types::UpstreamResponse;
