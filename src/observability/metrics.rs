//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gate_verdicts_total` (counter): gate decisions by verdict and category
//! - `gate_upstream_requests_total` (counter): forwarded requests by upstream, status
//! - `gate_upstream_duration_seconds` (histogram): upstream latency distribution
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::gate::Verdict;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Count a gate decision.
pub fn record_verdict(verdict: &Verdict) {
    let category = match verdict {
        Verdict::Reject(category) => category.as_str(),
        _ => "none",
    };
    counter!("gate_verdicts_total", "verdict" => verdict.label(), "category" => category).increment(1);
}

/// Record a forwarded request.
pub fn record_upstream(upstream: &str, status: u16, start: Instant) {
    counter!(
        "gate_upstream_requests_total",
        "upstream" => upstream.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gate_upstream_duration_seconds", "upstream" => upstream.to_string())
        .record(start.elapsed().as_secs_f64());
}
