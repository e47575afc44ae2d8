//! Which paths the gate runs on.
//!
//! Static include/exclude prefix lists, evaluated before the gate itself.
//! Static assets and the reserved API prefix are excluded by default.

use crate::config::GatePolicyConfig;
use crate::routing::{AnyMatcher, Matcher};
use crate::shield::has_parent_segment;

#[derive(Debug, Default)]
pub struct GateScope {
    include: AnyMatcher,
    exclude: AnyMatcher,
}

impl GateScope {
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Self {
        Self {
            include: AnyMatcher::prefixes(include),
            exclude: AnyMatcher::prefixes(exclude),
        }
    }

    pub fn from_config(config: &GatePolicyConfig) -> Self {
        Self::new(&config.include, &config.exclude)
    }

    /// True if the gate should evaluate `path`.
    ///
    /// A path with a `..` segment is always in scope: upstreams resolve it,
    /// so its prefix says nothing about where it lands.
    pub fn applies(&self, path: &str) -> bool {
        if has_parent_segment(path) {
            return true;
        }
        self.include.matches(path) && !self.exclude.matches(path)
    }
}
