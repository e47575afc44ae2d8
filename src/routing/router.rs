//! Upstream lookup.
//!
//! # Responsibilities
//! - Store compiled upstream routes
//! - Look up the upstream for a request path
//! - Return matched upstream or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Longest prefix wins; routes are sorted once at startup
//! - Explicit None rather than silent default

use std::sync::Arc;

use axum::http::uri::Authority;

use crate::config::UpstreamConfig;
use crate::routing::matcher::{Matcher, PathPrefixMatcher};

/// A compiled upstream route.
#[derive(Debug, Clone)]
pub struct Upstream {
    pub name: Arc<str>,
    pub authority: Authority,
    matcher: PathPrefixMatcher,
}

impl Upstream {
    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }
}

/// Longest-prefix upstream table.
#[derive(Debug, Default)]
pub struct UpstreamRouter {
    routes: Vec<Upstream>,
}

impl UpstreamRouter {
    /// Compile upstream routes from configuration.
    ///
    /// Entries whose address is not a valid authority are skipped with a warning;
    /// validation rejects them before this point in normal startup.
    pub fn from_config(configs: &[UpstreamConfig]) -> Self {
        let mut routes: Vec<Upstream> = configs
            .iter()
            .filter_map(|config| match config.address.parse::<Authority>() {
                Ok(authority) => Some(Upstream {
                    name: Arc::from(config.name.as_str()),
                    authority,
                    matcher: PathPrefixMatcher::new(config.path_prefix.clone()),
                }),
                Err(_) => {
                    tracing::warn!(upstream = %config.name, address = %config.address, "Invalid upstream address");
                    None
                }
            })
            .collect();

        routes.sort_by(|a, b| b.prefix().len().cmp(&a.prefix().len()));

        Self { routes }
    }

    /// Find the upstream serving `path`.
    pub fn match_path(&self, path: &str) -> Option<&Upstream> {
        self.routes.iter().find(|route| route.matcher.matches(path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
