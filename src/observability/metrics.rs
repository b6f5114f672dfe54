//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dashboard_remote_requests_total` (counter): calls by service, operation, result
//! - `dashboard_remote_request_duration_seconds` (histogram): call latency
//! - `dashboard_workflow_total` (counter): workflow runs by workflow, outcome
//!
//! Recording is a no-op until a recorder is installed, so library users and
//! tests pay nothing unless `init_metrics` is called.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one remote call.
pub fn record_remote_call(
    service: &'static str,
    operation: &'static str,
    result: &'static str,
    elapsed: Duration,
) {
    counter!(
        "dashboard_remote_requests_total",
        "service" => service,
        "operation" => operation,
        "result" => result
    )
    .increment(1);
    histogram!(
        "dashboard_remote_request_duration_seconds",
        "service" => service,
        "operation" => operation
    )
    .record(elapsed.as_secs_f64());
}

/// Record the terminal outcome of one workflow run.
pub fn record_workflow(workflow: &'static str, outcome: &'static str) {
    counter!(
        "dashboard_workflow_total",
        "workflow" => workflow,
        "outcome" => outcome
    )
    .increment(1);
}
