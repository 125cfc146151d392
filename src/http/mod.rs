//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, trace span)
//!     → handlers.rs (query → upstream fetch → dispatch)
//!     → response.rs (status mapping, error bodies, headers)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{AssetError, ErrorBody};
pub use server::{AppState, HttpServer};
