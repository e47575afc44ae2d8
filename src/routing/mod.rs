//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request path
//!     → router.rs (upstream lookup)
//!     → matcher.rs (evaluate prefix conditions)
//!     → Return: matched Upstream or None
//!
//! Route Compilation (at startup):
//!     UpstreamConfig[]
//!     → Sort by prefix length
//!     → Freeze as immutable UpstreamRouter
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same upstream

pub mod matcher;
pub mod router;

pub use matcher::{AnyMatcher, Matcher, PathPrefixMatcher};
pub use router::{Upstream, UpstreamRouter};
