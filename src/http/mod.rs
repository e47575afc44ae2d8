//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, trace span)
//!     → gate middleware (reject / redirect / pass)
//!     → forward.rs (upstream by prefix, stream response back)
//! ```

pub mod forward;
pub mod headers;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer, HEALTH_PATH};
