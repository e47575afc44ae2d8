//! Axum middleware applying the gate to every in-scope request.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::GatePolicyConfig;
use crate::gate::policy::{Gate, GatePolicy, Verdict};
use crate::gate::scope::GateScope;
use crate::gate::session::SessionState;
use crate::http::headers::client_ip;
use crate::observability::metrics;
use crate::shield::Ruleset;

/// State required by the gate middleware.
#[derive(Clone, Debug)]
pub struct GateState {
    pub gate: Arc<Gate>,
    pub scope: Arc<GateScope>,
    pub session_cookie: Arc<str>,
}

impl GateState {
    pub fn new(ruleset: Arc<Ruleset>, config: &GatePolicyConfig) -> Self {
        Self {
            gate: Arc::new(Gate::new(ruleset, GatePolicy::from_config(config))),
            scope: Arc::new(GateScope::from_config(config)),
            session_cookie: Arc::from(config.session_cookie.as_str()),
        }
    }
}

pub async fn gate_middleware(
    State(state): State<GateState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    if !state.scope.applies(&path) {
        return next.run(request).await;
    }

    let session = SessionState::from_headers(request.headers(), &state.session_cookie);
    let verdict = state.gate.evaluate(&path, session);
    metrics::record_verdict(&verdict);

    match verdict {
        Verdict::Reject(category) => {
            let peer = request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr);
            let client = client_ip(request.headers(), peer);
            tracing::warn!(
                client_ip = client.as_deref().unwrap_or("unknown"),
                path = %path,
                category = %category,
                "Blocked malicious path"
            );
            StatusCode::FORBIDDEN.into_response()
        }
        Verdict::RedirectToLogin => {
            tracing::debug!(path = %path, "No session, redirecting to login");
            Redirect::temporary(&state.gate.policy().login_path).into_response()
        }
        Verdict::RedirectToDashboard => {
            tracing::debug!(path = %path, "Session present, redirecting to dashboard");
            Redirect::temporary(&state.gate.policy().dashboard_path).into_response()
        }
        Verdict::PassThrough => next.run(request).await,
    }
}
