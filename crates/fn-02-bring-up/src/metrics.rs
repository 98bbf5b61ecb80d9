//! # Bring-Up Metrics
//!
//! Prometheus metrics for container engine calls.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! fn-02-bring-up = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `fabnet_containers_created_total` - Containers created, by node kind
//! - `fabnet_containers_started_total` - Containers started, by node kind
//! - `fabnet_provision_failures_total` - Failed engine calls, by operation
//! - `fabnet_runtime_call_seconds` - Engine call latency, by operation

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Containers created, labeled by node kind
    pub static ref CONTAINERS_CREATED: IntCounterVec = register_int_counter_vec!(
        "fabnet_containers_created_total",
        "Total number of node containers created",
        &["kind"]
    )
    .expect("Failed to create CONTAINERS_CREATED metric");

    /// Containers started, labeled by node kind
    pub static ref CONTAINERS_STARTED: IntCounterVec = register_int_counter_vec!(
        "fabnet_containers_started_total",
        "Total number of node containers started",
        &["kind"]
    )
    .expect("Failed to create CONTAINERS_STARTED metric");

    /// Failed engine calls, labeled by operation
    pub static ref PROVISION_FAILURES: IntCounterVec = register_int_counter_vec!(
        "fabnet_provision_failures_total",
        "Total number of failed container engine calls",
        &["op"]
    )
    .expect("Failed to create PROVISION_FAILURES metric");

    /// Engine call latency, labeled by operation
    pub static ref RUNTIME_CALL_LATENCY: HistogramVec = register_histogram_vec!(
        "fabnet_runtime_call_seconds",
        "Time taken by a container engine call in seconds",
        &["op"],
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to create RUNTIME_CALL_LATENCY metric");
}

/// Record a created container
#[cfg(feature = "metrics")]
pub fn record_container_created(kind: &str) {
    CONTAINERS_CREATED.with_label_values(&[kind]).inc();
}

/// Record a started container
#[cfg(feature = "metrics")]
pub fn record_container_started(kind: &str) {
    CONTAINERS_STARTED.with_label_values(&[kind]).inc();
}

/// Record a failed engine call
#[cfg(feature = "metrics")]
pub fn record_provision_failure(op: &str) {
    PROVISION_FAILURES.with_label_values(&[op]).inc();
}

/// Record engine call latency
#[cfg(feature = "metrics")]
pub fn record_runtime_call_latency(op: &str, seconds: f64) {
    RUNTIME_CALL_LATENCY.with_label_values(&[op]).observe(seconds);
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_container_created(_kind: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_container_started(_kind: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_provision_failure(_op: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_runtime_call_latency(_op: &str, _seconds: f64) {}
