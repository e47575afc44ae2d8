//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that gate paths are well formed and do not contradict each other
//! - Check that configured shield patterns compile
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;

use axum::http::uri::Authority;

use crate::config::schema::GateConfig;
use crate::gate::policy::is_under_prefix;
use crate::shield::Ruleset;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human readable description.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("`{}` is not a socket address", config.listener.bind_address),
        ));
    }

    validate_gate(config, &mut errors);
    validate_upstreams(config, &mut errors);

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level `{}`", config.observability.log_level),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("`{}` is not a socket address", config.observability.metrics_address),
        ));
    }

    if url::Url::parse(&config.api.base_url).is_err() {
        errors.push(ValidationError::new(
            "api.base_url",
            format!("`{}` is not a valid URL", config.api.base_url),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_gate(config: &GateConfig, errors: &mut Vec<ValidationError>) {
    let gate = &config.gate;

    if gate.session_cookie.is_empty()
        || gate
            .session_cookie
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || "=;,\"".contains(c))
    {
        errors.push(ValidationError::new(
            "gate.session_cookie",
            format!("`{}` is not a valid cookie name", gate.session_cookie),
        ));
    }

    let paths = [
        ("gate.login_path", &gate.login_path),
        ("gate.dashboard_path", &gate.dashboard_path),
        ("gate.protected_prefix", &gate.protected_prefix),
        ("gate.home_path", &gate.home_path),
    ];
    for (field, path) in paths {
        if !path.starts_with('/') {
            errors.push(ValidationError::new(field, format!("`{}` must start with '/'", path)));
        }
    }
    for prefix in gate.include.iter().chain(gate.exclude.iter()) {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::new(
                "gate.include/exclude",
                format!("`{}` must start with '/'", prefix),
            ));
        }
    }

    if gate.protected_prefix == "/" {
        errors.push(ValidationError::new(
            "gate.protected_prefix",
            "cannot protect the whole site; login and home must stay public",
        ));
    } else {
        if is_under_prefix(&gate.login_path, &gate.protected_prefix) {
            errors.push(ValidationError::new(
                "gate.login_path",
                "login page cannot live inside the protected area",
            ));
        }
        if is_under_prefix(&gate.home_path, &gate.protected_prefix) {
            errors.push(ValidationError::new(
                "gate.home_path",
                "home page cannot live inside the protected area",
            ));
        }
    }

    match Ruleset::from_config(&config.shield) {
        Ok(ruleset) => {
            for (field, path) in paths {
                if let Some(category) = ruleset.classify(path) {
                    errors.push(ValidationError::new(
                        field,
                        format!("`{}` would be rejected as {}", path, category),
                    ));
                }
            }
        }
        Err(e) => errors.push(ValidationError::new("shield.rules", e.to_string())),
    }
}

fn validate_upstreams(config: &GateConfig, errors: &mut Vec<ValidationError>) {
    if config.upstreams.is_empty() {
        errors.push(ValidationError::new("upstreams", "at least one upstream is required"));
    }

    let mut names = HashSet::new();
    for upstream in &config.upstreams {
        if !names.insert(upstream.name.as_str()) {
            errors.push(ValidationError::new(
                "upstreams.name",
                format!("duplicate upstream `{}`", upstream.name),
            ));
        }
        if !upstream.path_prefix.starts_with('/') {
            errors.push(ValidationError::new(
                "upstreams.path_prefix",
                format!("`{}` must start with '/'", upstream.path_prefix),
            ));
        }
        if upstream.address.parse::<Authority>().is_err() {
            errors.push(ValidationError::new(
                "upstreams.address",
                format!("`{}` is not a host:port authority", upstream.address),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ShieldRuleConfig, UpstreamConfig};
    use crate::shield::PatternCategory;

    fn fields(config: &GateConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GateConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GateConfig::default();
        config.listener.bind_address = "nope".into();
        config.timeouts.request_secs = 0;
        config.api.base_url = "not a url".into();

        let fields = fields(&config);
        assert!(fields.contains(&"listener.bind_address".to_string()));
        assert!(fields.contains(&"timeouts.request_secs".to_string()));
        assert!(fields.contains(&"api.base_url".to_string()));
    }

    #[test]
    fn test_login_inside_protected_area() {
        let mut config = GateConfig::default();
        config.gate.login_path = "/dashboard/login".into();
        assert!(fields(&config).contains(&"gate.login_path".to_string()));
    }

    #[test]
    fn test_home_inside_protected_area() {
        let mut config = GateConfig::default();
        config.gate.home_path = "/dashboard/home".into();
        assert!(fields(&config).contains(&"gate.home_path".to_string()));

        config.gate.home_path = "/index.php".into();
        assert!(fields(&config).contains(&"gate.home_path".to_string()));
    }

    #[test]
    fn test_root_cannot_be_protected() {
        let mut config = GateConfig::default();
        config.gate.protected_prefix = "/".into();
        assert!(fields(&config).contains(&"gate.protected_prefix".to_string()));
    }

    #[test]
    fn test_gate_path_matching_shield() {
        let mut config = GateConfig::default();
        config.gate.dashboard_path = "/admin".into();
        config.gate.protected_prefix = "/admin".into();
        let fields = fields(&config);
        assert!(fields.contains(&"gate.dashboard_path".to_string()));
        assert!(fields.contains(&"gate.protected_prefix".to_string()));
    }

    #[test]
    fn test_bad_cookie_name() {
        let mut config = GateConfig::default();
        config.gate.session_cookie = "a b".into();
        assert!(fields(&config).contains(&"gate.session_cookie".to_string()));
    }

    #[test]
    fn test_bad_shield_rule() {
        let mut config = GateConfig::default();
        config.shield.rules.push(ShieldRuleConfig {
            category: PatternCategory::AdminPanel,
            pattern: "[".into(),
        });
        assert!(fields(&config).contains(&"shield.rules".to_string()));
    }

    #[test]
    fn test_upstream_checks() {
        let mut config = GateConfig::default();
        config.upstreams.push(UpstreamConfig {
            name: "dashboard".into(),
            path_prefix: "static".into(),
            address: "not an authority".into(),
        });
        let fields = fields(&config);
        assert!(fields.contains(&"upstreams.name".to_string()));
        assert!(fields.contains(&"upstreams.path_prefix".to_string()));
        assert!(fields.contains(&"upstreams.address".to_string()));
    }

    #[test]
    fn test_no_upstreams() {
        let mut config = GateConfig::default();
        config.upstreams.clear();
        assert!(fields(&config).contains(&"upstreams".to_string()));
    }
}
