//! Backend response and request bodies.
//!
//! Hub and device payloads come either in the backend's snake_case form or
//! with the vendor's camelCase names; both are accepted.

use serde::{Deserialize, Serialize};

use crate::billing::{PlanTier, Subscription, VoucherCode};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(flatten)]
    pub subscription: Subscription,
    #[serde(default)]
    pub subscription_active: bool,
    #[serde(default)]
    pub billing_status: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Hub {
    #[serde(alias = "hubId")]
    pub id: String,
    #[serde(default, alias = "hubName")]
    pub name: Option<String>,
    #[serde(default, alias = "hubBindingRole")]
    pub role: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, alias = "online")]
    pub connection_status: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Device {
    pub id: String,
    #[serde(default, alias = "hubId")]
    pub hub_id: Option<String>,
    #[serde(default, alias = "deviceName")]
    pub name: Option<String>,
    #[serde(default, alias = "deviceType")]
    pub device_type: Option<String>,
    #[serde(default, alias = "roomId")]
    pub room_id: Option<String>,
    #[serde(default, alias = "groupId")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub online: Option<bool>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventLog {
    pub id: String,
    pub hub_id: String,
    pub timestamp: String,
    pub event_code: String,
    #[serde(default)]
    pub event_desc: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
}

/// One page of hub events. Empty when the hub has no log yet.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EventLogList {
    pub logs: Vec<EventLog>,
    pub total_count: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingHistoryItem {
    pub id: String,
    pub date: String,
    /// `voucher` or `payment`.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub amount: Option<String>,
    pub status: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedeemedVoucher {
    pub code: String,
    pub duration_days: u32,
    pub is_redeemed: bool,
    #[serde(default)]
    pub redeemed_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutSession {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default = "default_notification_kind")]
    pub kind: String,
    #[serde(default)]
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: String,
}

fn default_notification_kind() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationSummary {
    pub unread_count: u64,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RedeemRequest<'a> {
    pub code: &'a VoucherCode,
}

#[derive(Debug, Serialize)]
pub(crate) struct CheckoutRequest {
    pub plan_type: PlanTier,
}

#[derive(Debug, Serialize)]
pub(crate) struct LogsQuery {
    pub limit: u32,
    pub offset: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::SubscriptionStatus;

    #[test]
    fn test_hub_accepts_vendor_names() {
        let hub: Hub = serde_json::from_str(r#"{"hubId":"00A1B2","hubName":"Home","state":"ARMED"}"#).unwrap();
        assert_eq!(hub.id, "00A1B2");
        assert_eq!(hub.name.as_deref(), Some("Home"));

        let hub: Hub = serde_json::from_str(r#"{"id":"00A1B2"}"#).unwrap();
        assert_eq!(hub.id, "00A1B2");
        assert!(hub.name.is_none());
    }

    #[test]
    fn test_device_accepts_vendor_names() {
        let device: Device =
            serde_json::from_str(r#"{"id":"3","deviceName":"Door","deviceType":"DoorProtect","online":false}"#)
                .unwrap();
        assert_eq!(device.name.as_deref(), Some("Door"));
        assert_eq!(device.device_type.as_deref(), Some("DoorProtect"));
        assert_eq!(device.online, Some(false));
    }

    #[test]
    fn test_profile_carries_subscription() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id":7,"email":"a@b.c","is_active":true,"subscription_plan":"basic",
                "subscription_status":"trialing","subscription_expires_at":null,
                "subscription_active":true,"billing_status":"trialing"}"#,
        )
        .unwrap();
        assert_eq!(profile.subscription.plan, PlanTier::Basic);
        assert_eq!(profile.subscription.status, Some(SubscriptionStatus::Trialing));
        assert!(profile.subscription_active);
    }

    #[test]
    fn test_checkout_request_body() {
        let body = serde_json::to_value(CheckoutRequest { plan_type: PlanTier::Pro }).unwrap();
        assert_eq!(body, serde_json::json!({"plan_type": "pro"}));
    }
}
