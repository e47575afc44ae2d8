//! Malicious-path shield.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     builtin rule table (rules.rs) + [shield] config rules
//!     → ruleset.rs (compile per category, case-insensitive)
//!     → Arc<Ruleset> (immutable, shared by every request)
//!
//! Per request:
//!     path → Ruleset::classify (raw and percent-decoded) → Some(category) | None
//! ```
//!
//! # Design Decisions
//! - Categories are evaluated in a fixed order; first match wins
//! - The matched category is for logs and metrics only, never for the client
//! - Compiled once at startup; a bad pattern is a startup error

pub mod path;
pub mod rules;
pub mod ruleset;

pub use path::{decode_path, has_parent_segment};
pub use rules::PatternCategory;
pub use ruleset::{Ruleset, ShieldError};
