//! Gate decision procedure.
//!
//! `Gate::evaluate` is a pure function of `(path, session)`. It runs, in order:
//! 1. malicious-path rejection, whatever the session state
//! 2. unauthenticated access under the protected prefix → login
//! 3. authenticated access to the login page → dashboard
//! 4. pass-through

use std::sync::Arc;

use crate::config::GatePolicyConfig;
use crate::gate::session::SessionState;
use crate::shield::{decode_path, PatternCategory, Ruleset};

/// Outcome of evaluating a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Matched a malicious-path pattern. Answered with 403 and an empty body.
    Reject(PatternCategory),
    /// No session under the protected area.
    RedirectToLogin,
    /// Session present on the login page.
    RedirectToDashboard,
    /// Let the request through unmodified.
    PassThrough,
}

impl Verdict {
    /// Stable label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Reject(_) => "reject",
            Verdict::RedirectToLogin => "redirect_login",
            Verdict::RedirectToDashboard => "redirect_dashboard",
            Verdict::PassThrough => "pass",
        }
    }
}

/// Redirect targets and protected area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePolicy {
    pub login_path: String,
    pub dashboard_path: String,
    pub protected_prefix: String,
}

impl GatePolicy {
    pub fn from_config(config: &GatePolicyConfig) -> Self {
        Self {
            login_path: config.login_path.clone(),
            dashboard_path: config.dashboard_path.clone(),
            protected_prefix: config.protected_prefix.clone(),
        }
    }
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self::from_config(&GatePolicyConfig::default())
    }
}

/// The edge request gate.
#[derive(Debug, Clone)]
pub struct Gate {
    ruleset: Arc<Ruleset>,
    policy: GatePolicy,
}

impl Gate {
    pub fn new(ruleset: Arc<Ruleset>, policy: GatePolicy) -> Self {
        Self { ruleset, policy }
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Classify a request. `path` is the raw request path; session rules see it decoded.
    pub fn evaluate(&self, path: &str, session: SessionState) -> Verdict {
        if let Some(category) = self.ruleset.classify(path) {
            return Verdict::Reject(category);
        }

        let path = decode_path(path);
        let path = path.as_ref();
        match session {
            SessionState::Absent if is_under_prefix(path, &self.policy.protected_prefix) => {
                Verdict::RedirectToLogin
            }
            SessionState::Present if path == self.policy.login_path => Verdict::RedirectToDashboard,
            _ => Verdict::PassThrough,
        }
    }
}

/// True if `path` is `prefix` or lies below it on a segment boundary.
///
/// `/dashboard/settings` is under `/dashboard`; `/dashboards` is not.
pub fn is_under_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
        None => false,
    }
}
