//! Backend REST API client.
//!
//! Used by `gate-cli`; the gate itself never calls the backend.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    BillingHistoryItem, CheckoutSession, Device, EventLog, EventLogList, Hub, Notification,
    NotificationSummary, RedeemedVoucher, Token, UserProfile,
};
