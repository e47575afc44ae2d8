//! Plan permissions.
//!
//! # Data Flow
//! ```text
//! backend profile (plan, status, expiry)
//!     → subscription.rs (effective plan at `now`)
//!     → plan.rs (exhaustive tier → capability table)
//!     → AccessPolicy::can_access (developer-mode override)
//! ```
//!
//! # Design Decisions
//! - Unknown plan, status or capability names are parse errors, never a silent Free
//! - The capability table is a total `match`; adding a tier fails to compile until mapped

pub mod plan;
pub mod subscription;
pub mod voucher;

use thiserror::Error;

pub use plan::{Capability, PlanTier};
pub use subscription::{AccessPolicy, Subscription, SubscriptionStatus};
pub use voucher::VoucherCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("unknown plan `{0}`")]
    UnknownPlan(String),

    #[error("unknown capability `{0}`")]
    UnknownCapability(String),

    #[error("unknown subscription status `{0}`")]
    UnknownStatus(String),

    #[error("invalid voucher code `{0}`")]
    InvalidVoucher(String),
}
