//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GateConfig (validated, immutable)
//!     → compiled into Gate / UpstreamRouter at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ApiConfig, BillingConfig, GateConfig, GatePolicyConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, SecurityConfig, ShieldConfig, ShieldRuleConfig, TimeoutConfig,
    TlsConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
