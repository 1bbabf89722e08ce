//! Shared HTTP infrastructure for the fleet query service.
//!
//! This crate provides everything between the socket and `fleetquery-lib`:
//!
//! - [`build_router`]: the `/vehicles` routes, health probes and metrics endpoint
//! - [`AppState`]: the query service handlers call into
//! - [`ServiceResponse`] / [`ApiError`]: the success and error JSON envelopes
//! - [`WeightRangeParams`] and [`parse_year_param`]: request parameter parsing
//! - [`metrics`], [`logging`], [`middleware`]: observability
//! - [`ServiceConfig`]: environment-driven configuration
//!
//! # Architecture
//!
//! Handlers stay thin; filtering and aggregation live in `fleetquery-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse path / query parameters (400 on failure)           │
//! │  - Call VehicleService                                      │
//! │  - Map errors: no vehicles → 404, anything else → 500       │
//! │  - Wrap result in {"message", "data"}                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a fixture-backed state and a recording
//! service double. Enable the `test-utils` feature to access it from
//! dependent crates.

#![deny(warnings)]

pub mod config;
mod handlers;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;


pub use config::ServiceConfig;
pub use handlers::{
    average_capacity_by_brand, average_max_speed_by_brand, build_router,
    find_by_brand_and_year_range, find_by_color_and_year, search_by_weight_range,
};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{init_metrics, metrics_handler, MetricsConfig, MetricsError};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{from_lib_error, ApiError, MESSAGE_INTERNAL_ERROR, MESSAGE_NOT_FOUND};
pub use request::{parse_year_param, VehiclePath, WeightRangeParams};
pub use response::{
    ServiceResponse, MESSAGE_AVERAGE_CAPACITY_FOUND, MESSAGE_AVERAGE_SPEED_FOUND,
    MESSAGE_VEHICLES_FOUND,
};
pub use state::{AppState, AppStateError};
