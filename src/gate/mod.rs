//! Edge request gate.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → scope.rs (include/exclude prefixes; out of scope → pass)
//!     → session.rs (session cookie present?)
//!     → policy.rs (Gate::evaluate → Verdict)
//!     → middleware.rs (403 | 307 → /login | 307 → /dashboard | next)
//! ```
//!
//! # Design Decisions
//! - The decision is pure: no I/O, no shared mutable state
//! - Malicious-path rejection runs before any session logic
//! - The session cookie is never validated here; the backend does that

pub mod middleware;
pub mod policy;
pub mod scope;
pub mod session;

pub use middleware::{gate_middleware, GateState};
pub use policy::{Gate, GatePolicy, Verdict};
pub use scope::GateScope;
pub use session::SessionState;
