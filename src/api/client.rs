//! Typed client over the backend REST API.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::api::error::{parse_detail, ApiError};
use crate::api::types::{
    BillingHistoryItem, CheckoutRequest, CheckoutSession, Device, EventLogList, Hub, LoginForm,
    LogsQuery, Notification, NotificationSummary, RedeemRequest, RedeemedVoucher, Token,
    UserProfile,
};
use crate::billing::{PlanTier, VoucherCode};
use crate::config::ApiConfig;

/// Client for the versioned backend API (`.../api/v1`).
///
/// Authenticated calls carry the session token as a bearer credential.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("securflow-gate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base, token: None })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Base URL plus percent-encoded path segments.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // Auth

    /// Exchange credentials for a token and keep it for later calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Token, ApiError> {
        let request = self
            .http
            .post(self.endpoint(&["auth", "token"]))
            .form(&LoginForm { username, password });
        let token: Token = decode(check(request.send().await?).await?).await?;

        tracing::debug!(user = %username, "Logged in");
        self.token = Some(token.access_token.clone());
        Ok(token)
    }

    pub async fn logout(&mut self) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, &["auth", "logout"])).await?;
        self.token = None;
        Ok(())
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.fetch(self.request(Method::GET, &["auth", "me"])).await
    }

    // Hubs

    pub async fn list_hubs(&self) -> Result<Vec<Hub>, ApiError> {
        self.fetch(self.request(Method::GET, &["ajax", "hubs"])).await
    }

    pub async fn hub_devices(&self, hub_id: &str) -> Result<Vec<Device>, ApiError> {
        self.fetch(self.request(Method::GET, &["ajax", "hubs", hub_id, "devices"]))
            .await
    }

    /// Event log page for a hub. A hub without a log answers 404, reported as empty.
    pub async fn hub_logs(&self, hub_id: &str, limit: u32, offset: u32) -> Result<EventLogList, ApiError> {
        let request = self
            .request(Method::GET, &["ajax", "hubs", hub_id, "logs"])
            .query(&LogsQuery { limit, offset });

        match self.fetch(request).await {
            Err(err) if err.is_not_found() => {
                tracing::debug!(hub_id = %hub_id, "No event log for hub");
                Ok(EventLogList::default())
            }
            other => other,
        }
    }

    // Billing

    pub async fn billing_history(&self) -> Result<Vec<BillingHistoryItem>, ApiError> {
        self.fetch(self.request(Method::GET, &["billing", "history"])).await
    }

    pub async fn redeem_voucher(&self, code: &VoucherCode) -> Result<RedeemedVoucher, ApiError> {
        let request = self
            .request(Method::POST, &["billing", "redeem"])
            .json(&RedeemRequest { code });
        self.fetch(request).await
    }

    pub async fn create_checkout_session(&self, plan: PlanTier) -> Result<CheckoutSession, ApiError> {
        let request = self
            .request(Method::POST, &["billing", "create-checkout-session"])
            .json(&CheckoutRequest { plan_type: plan });
        self.fetch(request).await
    }

    // Notifications

    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.fetch(self.request(Method::GET, &["notifications"])).await
    }

    pub async fn notification_summary(&self) -> Result<NotificationSummary, ApiError> {
        self.fetch(self.request(Method::GET, &["notifications", "summary"]))
            .await
    }

    pub async fn mark_notification_read(&self, id: i64) -> Result<Notification, ApiError> {
        let id = id.to_string();
        self.fetch(self.request(Method::POST, &["notifications", &id, "read"]))
            .await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, &["notifications", "mark-all-read"]))
            .await
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let request = self.http.request(method, self.endpoint(segments));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        decode(check(request.send().await?).await?).await
    }

    async fn execute(&self, request: RequestBuilder) -> Result<(), ApiError> {
        check(request.send().await?).await?;
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = parse_detail(&body);
    tracing::debug!(status = status.as_u16(), detail = ?detail, "Backend request failed");

    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    Ok(response.json().await?)
}
