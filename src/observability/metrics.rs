//! Metrics definitions and recording helpers.
//!
//! All metrics are prefixed with `todo_` and use Prometheus naming
//! conventions. Request metrics are recorded by the tracking middleware,
//! gauges by the runtime sampler.

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};

use crate::db::PoolStats;

// Metric name constants
pub const REQUESTS_TOTAL: &str = "todo_http_requests_total";
pub const REQUEST_DURATION: &str = "todo_http_request_duration_seconds";

pub const PROCESS_RESIDENT_BYTES: &str = "todo_process_resident_memory_bytes";
pub const PROCESS_VIRTUAL_BYTES: &str = "todo_process_virtual_memory_bytes";
pub const LOGICAL_CPUS: &str = "todo_process_logical_cpus";
pub const RUNTIME_ALIVE_TASKS: &str = "todo_runtime_alive_tasks";
pub const RUNTIME_WORKER_THREADS: &str = "todo_runtime_worker_threads";

pub const POOL_TOTAL: &str = "todo_db_pool_connections_total";
pub const POOL_IDLE: &str = "todo_db_pool_connections_idle";
pub const POOL_ACQUIRED: &str = "todo_db_pool_connections_acquired";

/// Register all metric descriptions. Called once after exporter install.
pub fn register_metrics() {
    describe_counter!(REQUESTS_TOTAL, "Total number of HTTP requests");
    describe_histogram!(REQUEST_DURATION, "HTTP request duration in seconds");

    describe_gauge!(PROCESS_RESIDENT_BYTES, "Resident memory of the process");
    describe_gauge!(PROCESS_VIRTUAL_BYTES, "Virtual memory of the process");
    describe_gauge!(LOGICAL_CPUS, "Logical CPUs available to the process");
    describe_gauge!(RUNTIME_ALIVE_TASKS, "Tasks currently alive on the runtime");
    describe_gauge!(RUNTIME_WORKER_THREADS, "Runtime worker threads");

    describe_gauge!(POOL_TOTAL, "Open database connections");
    describe_gauge!(POOL_IDLE, "Idle database connections");
    describe_gauge!(POOL_ACQUIRED, "Database connections checked out");
}

/// Install the Prometheus exporter and register metric descriptions.
///
/// Failure here is non-fatal to request processing; the caller decides
/// whether to continue without metrics.
pub fn install_exporter(addr: SocketAddr) -> Result<(), String> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| e.to_string())?;

    register_metrics();
    Ok(())
}

/// Record one completed request: counter increment plus one duration
/// observation, labeled by method, matched route and status code.
pub fn record_request(method: &str, route: &str, status: u16, elapsed: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!(REQUESTS_TOTAL, &labels).increment(1);
    histogram!(REQUEST_DURATION, &labels).record(elapsed.as_secs_f64());
}

/// Publish a pool occupancy snapshot.
pub fn set_pool_stats(stats: PoolStats) {
    gauge!(POOL_TOTAL).set(f64::from(stats.total));
    gauge!(POOL_IDLE).set(f64::from(stats.idle));
    gauge!(POOL_ACQUIRED).set(f64::from(stats.acquired));
}

/// Publish process memory gauges (bytes).
pub fn set_process_memory(resident: u64, virtual_bytes: u64) {
    gauge!(PROCESS_RESIDENT_BYTES).set(resident as f64);
    gauge!(PROCESS_VIRTUAL_BYTES).set(virtual_bytes as f64);
}

/// Publish runtime task and thread gauges.
pub fn set_runtime_tasks(alive: usize, workers: usize) {
    gauge!(RUNTIME_ALIVE_TASKS).set(alive as f64);
    gauge!(RUNTIME_WORKER_THREADS).set(workers as f64);
}

/// Publish the logical CPU count.
pub fn set_logical_cpus(cpus: usize) {
    gauge!(LOGICAL_CPUS).set(cpus as f64);
}
