//! Fleet query HTTP microservice.
//!
//! Serves read-only queries over a vehicle dataset loaded once at startup.
//!
//! # Endpoints
//!
//! - `GET /vehicles/color/{color}/year/{year}` - Vehicles of a color built in a year
//! - `GET /vehicles/brand/{brand}/between/{start_year}/{end_year}` - Vehicles of a brand in a year range
//! - `GET /vehicles/average_speed/brand/{brand}` - Average max speed of a brand
//! - `GET /vehicles/average_capacity/brand/{brand}` - Average passenger capacity of a brand
//! - `GET /vehicles/weight?weight_min=&weight_max=` - Vehicles in a weight range
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `FLEETQUERY_DATA_PATH` - Path to the vehicles JSON file (default: /data/vehicles.json)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus exporter settings

use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use fleetquery_service_shared::{
    build_router, init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig,
    ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("fleetquery");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        data_path = %config.data_path.display(),
        port = config.port,
        "starting fleet query service"
    );

    let state = AppState::load(&config.data_path).map_err(|e| {
        error!(error = %e, path = %config.data_path.display(), "failed to load application state");
        e
    })?;
    info!(vehicles = state.vehicle_count(), "application state loaded");

    let app = build_router(state, &metrics_config.path).layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
