//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::shield::PatternCategory;

/// Root configuration for the edge gate.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GateConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Session and redirect policy.
    pub gate: GatePolicyConfig,

    /// Malicious-path ruleset.
    pub shield: ShieldConfig,

    /// Upstream applications, selected by longest path prefix.
    pub upstreams: Vec<UpstreamConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Security hardening.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Backend REST API used by the CLI.
    pub api: ApiConfig,

    /// Plan permission settings.
    pub billing: BillingConfig,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            gate: GatePolicyConfig::default(),
            shield: ShieldConfig::default(),
            upstreams: vec![
                UpstreamConfig {
                    name: "dashboard".to_string(),
                    path_prefix: "/".to_string(),
                    address: "127.0.0.1:3000".to_string(),
                },
                UpstreamConfig {
                    name: "api".to_string(),
                    path_prefix: "/api".to_string(),
                    address: "127.0.0.1:8000".to_string(),
                },
            ],
            timeouts: TimeoutConfig::default(),
            security: SecurityConfig::default(),
            observability: ObservabilityConfig::default(),
            api: ApiConfig::default(),
            billing: BillingConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Session marker and redirect targets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatePolicyConfig {
    /// Cookie whose presence marks an authenticated session.
    pub session_cookie: String,

    /// Login entry point.
    pub login_path: String,

    /// Default page of the protected area.
    pub dashboard_path: String,

    /// Prefix of the protected area (matched per path segment).
    pub protected_prefix: String,

    /// Public home page. Only checked at load time (outside the protected
    /// area, not shielded); the gate passes it like any other public path.
    pub home_path: String,

    /// Prefixes the gate runs on.
    pub include: Vec<String>,

    /// Prefixes the gate never runs on (static assets, reserved API prefix).
    pub exclude: Vec<String>,
}

impl Default for GatePolicyConfig {
    fn default() -> Self {
        Self {
            session_cookie: "access_token".to_string(),
            login_path: "/login".to_string(),
            dashboard_path: "/dashboard".to_string(),
            protected_prefix: "/dashboard".to_string(),
            home_path: "/".to_string(),
            include: vec!["/".to_string()],
            exclude: vec![
                "/api".to_string(),
                "/_next/static".to_string(),
                "/_next/image".to_string(),
                "/favicon.ico".to_string(),
                "/_gate".to_string(),
            ],
        }
    }
}

/// Malicious-path ruleset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShieldConfig {
    /// Load the built-in pattern table.
    pub builtin: bool,

    /// Extra patterns appended to their category.
    pub rules: Vec<ShieldRuleConfig>,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            rules: Vec::new(),
        }
    }
}

/// A single configured pattern.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShieldRuleConfig {
    /// Category the pattern is reported under.
    pub category: PatternCategory,

    /// Regular expression, matched case-insensitively against the path.
    pub pattern: String,
}

/// Upstream application.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Upstream identifier for logging/metrics.
    pub name: String,

    /// Path prefix routed to this upstream.
    pub path_prefix: String,

    /// Upstream authority (e.g., "127.0.0.1:3000" or "dashboard:3000").
    pub address: String,
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Idle pooled upstream connection timeout in seconds.
    pub idle_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
            idle_secs: 60,
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Add security response headers when the upstream did not set them.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Backend REST API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Versioned API base URL.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Plan permission configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BillingConfig {
    /// Grant every capability regardless of plan.
    pub developer_mode: bool,
}
