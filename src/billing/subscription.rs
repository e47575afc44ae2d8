//! Subscription state and the effective plan derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::billing::plan::{Capability, PlanTier};
use crate::billing::PlanError;
use crate::config::BillingConfig;

/// Billing provider subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Unpaid,
    Incomplete,
    IncompleteExpired,
    Inactive,
}

impl SubscriptionStatus {
    const ALL: [SubscriptionStatus; 8] = [
        SubscriptionStatus::Active,
        SubscriptionStatus::Trialing,
        SubscriptionStatus::PastDue,
        SubscriptionStatus::Canceled,
        SubscriptionStatus::Unpaid,
        SubscriptionStatus::Incomplete,
        SubscriptionStatus::IncompleteExpired,
        SubscriptionStatus::Inactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Unpaid => "unpaid",
            SubscriptionStatus::Incomplete => "incomplete",
            SubscriptionStatus::IncompleteExpired => "incomplete_expired",
            SubscriptionStatus::Inactive => "inactive",
        }
    }

    /// Whether the status entitles the holder to their plan.
    pub fn grants_plan(&self) -> bool {
        matches!(self, SubscriptionStatus::Active | SubscriptionStatus::Trialing)
    }
}

impl FromStr for SubscriptionStatus {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubscriptionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| PlanError::UnknownStatus(s.to_string()))
    }
}

/// A user's subscription as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Subscription {
    #[serde(rename = "subscription_plan")]
    pub plan: PlanTier,
    #[serde(rename = "subscription_status", default)]
    pub status: Option<SubscriptionStatus>,
    #[serde(rename = "subscription_expires_at", default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn new(plan: PlanTier) -> Self {
        Self {
            plan,
            status: None,
            expires_at: None,
        }
    }

    pub fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Plan the user is entitled to at `now`.
    ///
    /// Active or trialing subscriptions keep their plan. Otherwise unexpired
    /// voucher time grants Premium. Everything else is Free.
    pub fn effective_plan(&self, now: DateTime<Utc>) -> PlanTier {
        if self.status.is_some_and(|s| s.grants_plan()) {
            return self.plan;
        }
        match self.expires_at {
            Some(expires_at) if expires_at > now => PlanTier::Premium,
            _ => PlanTier::Free,
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.effective_plan(now) != PlanTier::Free
    }
}

/// Capability checks, with the developer-mode override.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy {
    pub developer_mode: bool,
}

impl AccessPolicy {
    pub fn from_config(config: &BillingConfig) -> Self {
        Self {
            developer_mode: config.developer_mode,
        }
    }

    pub fn can_access(&self, subscription: &Subscription, capability: Capability, now: DateTime<Utc>) -> bool {
        self.developer_mode || subscription.effective_plan(now).allows(capability)
    }

    /// Every capability granted at `now`.
    pub fn granted(&self, subscription: &Subscription, now: DateTime<Utc>) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|cap| self.can_access(subscription, *cap, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn policy() -> AccessPolicy {
        AccessPolicy::default()
    }

    #[test]
    fn test_active_keeps_plan() {
        let now = Utc::now();
        let sub = Subscription::new(PlanTier::Basic).with_status(SubscriptionStatus::Active);
        assert_eq!(sub.effective_plan(now), PlanTier::Basic);
        assert!(policy().can_access(&sub, Capability::ReadLogs, now));
        assert!(!policy().can_access(&sub, Capability::SendCommands, now));
    }

    #[test]
    fn test_expired_subscription_reverts_to_free() {
        let now = Utc::now();
        let sub = Subscription::new(PlanTier::Premium)
            .with_status(SubscriptionStatus::Canceled)
            .with_expiry(now - Duration::days(1));
        assert_eq!(sub.effective_plan(now), PlanTier::Free);
        assert!(policy().can_access(&sub, Capability::ListHubs, now));
        assert!(!policy().can_access(&sub, Capability::ReadDevices, now));
        assert!(!policy().can_access(&sub, Capability::ReadLogs, now));
        assert!(!policy().can_access(&sub, Capability::SendCommands, now));
        assert!(!policy().can_access(&sub, Capability::AccessProxy, now));
    }

    #[test]
    fn test_trialing_has_plan_access() {
        let now = Utc::now();
        let sub = Subscription::new(PlanTier::Premium).with_status(SubscriptionStatus::Trialing);
        assert!(policy().can_access(&sub, Capability::AccessProxy, now));
        assert!(policy().can_access(&sub, Capability::SendCommands, now));
    }

    #[test]
    fn test_voucher_time_grants_premium() {
        let now = Utc::now();
        let sub = Subscription::new(PlanTier::Free).with_expiry(now + Duration::days(30));
        assert_eq!(sub.effective_plan(now), PlanTier::Premium);
        assert!(sub.is_active(now));
    }

    #[test]
    fn test_no_status_no_expiry_is_free() {
        let sub = Subscription::new(PlanTier::Pro);
        assert_eq!(sub.effective_plan(Utc::now()), PlanTier::Free);
        assert!(!sub.is_active(Utc::now()));
    }

    #[test]
    fn test_past_due_loses_plan() {
        let sub = Subscription::new(PlanTier::Pro).with_status(SubscriptionStatus::PastDue);
        assert_eq!(sub.effective_plan(Utc::now()), PlanTier::Free);
    }

    #[test]
    fn test_developer_mode_grants_everything() {
        let dev = AccessPolicy { developer_mode: true };
        let sub = Subscription::new(PlanTier::Free);
        assert_eq!(dev.granted(&sub, Utc::now()), Capability::ALL.to_vec());
    }

    #[test]
    fn test_granted_list() {
        let sub = Subscription::new(PlanTier::Pro).with_status(SubscriptionStatus::Active);
        let granted = policy().granted(&sub, Utc::now());
        assert!(granted.contains(&Capability::SendCommands));
        assert!(!granted.contains(&Capability::AccessProxy));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("past_due".parse::<SubscriptionStatus>().unwrap(), SubscriptionStatus::PastDue);
        assert!(matches!("paused".parse::<SubscriptionStatus>(), Err(PlanError::UnknownStatus(_))));
    }

    #[test]
    fn test_deserialize_from_profile_fields() {
        let sub: Subscription = serde_json::from_str(
            r#"{"subscription_plan":"pro","subscription_status":"active","subscription_expires_at":null}"#,
        )
        .unwrap();
        assert_eq!(sub.plan, PlanTier::Pro);
        assert_eq!(sub.status, Some(SubscriptionStatus::Active));
        assert!(sub.expires_at.is_none());
    }
}
