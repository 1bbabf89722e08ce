//! Prometheus metrics for the fleet query service.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Install the Prometheus recorder
//! - [`metrics_handler`]: Axum handler for the `/metrics` endpoint
//! - Business metric helpers for the `/vehicles` operations
//!
//! # Example
//!
//! ```no_run
//! use fleetquery_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: Path for metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let path = std::env::var("METRICS_PATH").unwrap_or_else(|_| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus recorder.
///
/// # Errors
///
/// Fails if metrics are disabled, if a recorder is already installed, or if
/// the Prometheus builder cannot install.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Axum handler for the `/metrics` endpoint.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Record how many vehicles a successful finder returned.
///
/// Records to the `fleetquery_vehicles_returned` histogram.
///
/// # Arguments
///
/// * `count` - Number of vehicles in the response
/// * `operation` - e.g. "color_and_year", "weight_range"
pub fn record_vehicles_returned(count: usize, operation: &str) {
    metrics::histogram!(
        "fleetquery_vehicles_returned",
        "operation" => operation.to_string()
    )
    .record(count as f64);
}

/// Record a successful brand aggregate.
///
/// Increments the `fleetquery_aggregates_computed_total` counter.
pub fn record_aggregate_computed(operation: &str) {
    metrics::counter!(
        "fleetquery_aggregates_computed_total",
        "operation" => operation.to_string()
    )
    .increment(1);
}

/// Record a failed query.
///
/// Increments the `fleetquery_queries_failed_total` counter.
///
/// # Arguments
///
/// * `operation` - The operation that failed
/// * `reason` - "invalid_parameter", "not_found" or "internal_error"
pub fn record_query_failed(operation: &str, reason: &str) {
    metrics::counter!(
        "fleetquery_queries_failed_total",
        "operation" => operation.to_string(),
        "reason" => reason.to_string()
    )
    .increment(1);
}
