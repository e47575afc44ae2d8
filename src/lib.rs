//! SecurFlow edge gate library.
//!
//! Request shield, session gate and path-prefix forwarding in front of the
//! dashboard and backend, plus a typed client for the backend API.

pub mod api;
pub mod billing;
pub mod config;
pub mod gate;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod shield;

pub use config::GateConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
