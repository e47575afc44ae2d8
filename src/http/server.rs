//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the gate health endpoint and the forwarding fallback
//! - Wire up middleware (request ID, tracing, security headers, timeout, body limit, gate)
//! - Bind server to listener, plain or TLS
//! - Graceful shutdown on the lifecycle broadcast

use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::get,
    Json, Router,
};
use axum_server::tls_rustls::RustlsConfig;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::{TokioExecutor, TokioTimer},
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GateConfig;
use crate::gate::{gate_middleware, GateState};
use crate::http::forward::forward_handler;
use crate::http::request::{make_request_span, MakeRequestUuidV4};
use crate::routing::UpstreamRouter;
use crate::shield::{Ruleset, ShieldError};

/// Health endpoint served by the gate itself.
pub const HEALTH_PATH: &str = "/_gate/health";

/// How long in-flight TLS connections may drain after shutdown.
const TLS_DRAIN_SECS: u64 = 10;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstreams: Arc<UpstreamRouter>,
    pub client: Client<HttpConnector, axum::body::Body>,
    /// Scheme reported upstream in X-Forwarded-Proto.
    pub proto: &'static str,
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// HTTP server for the edge gate.
pub struct HttpServer {
    router: Router,
    config: GateConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if a configured shield pattern does not compile.
    pub fn new(config: GateConfig) -> Result<Self, ShieldError> {
        let ruleset = Arc::new(Ruleset::from_config(&config.shield)?);
        let gate_state = GateState::new(ruleset, &config.gate);

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client = Client::builder(TokioExecutor::new())
            .pool_timer(TokioTimer::new())
            .pool_idle_timeout(Duration::from_secs(config.timeouts.idle_secs))
            .build(connector);

        let state = AppState {
            upstreams: Arc::new(UpstreamRouter::from_config(&config.upstreams)),
            client,
            proto: if config.listener.tls.is_some() { "https" } else { "http" },
        };

        let router = Self::build_router(&config, state, gate_state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GateConfig, state: AppState, gate_state: GateState) -> Router {
        let router = Router::new()
            .route(HEALTH_PATH, get(health))
            .fallback(forward_handler)
            .with_state(state)
            .layer(middleware::from_fn_with_state(gate_state, gate_middleware))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        let router = if config.security.enable_headers {
            router
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
        } else {
            router
        };

        router
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered router, for driving the gate without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstreams = self.config.upstreams.len(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server with TLS on the configured bind address.
    pub async fn run_tls(self, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let Some(tls) = self.config.listener.tls.clone() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "listener.tls is not configured",
            ));
        };
        let addr: SocketAddr = self
            .config
            .listener
            .bind_address
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let rustls = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;
        let handle = axum_server::Handle::new();

        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received");
            shutdown_handle.graceful_shutdown(Some(Duration::from_secs(TLS_DRAIN_SECS)));
        });

        tracing::info!(address = %addr, "HTTPS server starting");

        axum_server::bind_rustls(addr, rustls)
            .handle(handle)
            .serve(self.router.into_make_service_with_connect_info::<SocketAddr>())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
