//! Axum handlers for the `/vehicles` endpoints and the router that mounts them.
//!
//! Each handler parses its parameters, calls the [`VehicleService`] held in
//! [`AppState`], and shapes the result into a [`ServiceResponse`] or an
//! [`ApiError`]. Parameter errors are answered before the service is touched.
//!
//! [`VehicleService`]: fleetquery_lib::VehicleService

use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    routing::get,
    Router,
};
use tracing::{error, info, warn};

use fleetquery_lib::{Error as LibError, VehicleMap};

use crate::metrics::{
    metrics_handler, record_aggregate_computed, record_query_failed, record_vehicles_returned,
};
use crate::middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
use crate::problem::{from_lib_error, ApiError};
use crate::request::{parse_year_param, VehiclePath, WeightRangeParams};
use crate::response::{
    ServiceResponse, MESSAGE_AVERAGE_CAPACITY_FOUND, MESSAGE_AVERAGE_SPEED_FOUND,
    MESSAGE_VEHICLES_FOUND,
};
use crate::{health_live, health_ready, AppState};

type VehiclesResult = Result<ServiceResponse<VehicleMap>, ApiError>;

/// Build the service router with every `/vehicles` route, health probes and
/// the metrics endpoint mounted at `metrics_path`.
///
/// A `metrics_path` without a leading `/` falls back to `/metrics`.
pub fn build_router(state: AppState, metrics_path: &str) -> Router {
    let metrics_path = if metrics_path.starts_with('/') {
        metrics_path
    } else {
        "/metrics"
    };

    Router::new()
        .route(
            "/vehicles/color/{color}/year/{year}",
            get(find_by_color_and_year),
        )
        .route(
            "/vehicles/brand/{brand}/between/{start_year}/{end_year}",
            get(find_by_brand_and_year_range),
        )
        .route(
            "/vehicles/average_speed/brand/{brand}",
            get(average_max_speed_by_brand),
        )
        .route(
            "/vehicles/average_capacity/brand/{brand}",
            get(average_capacity_by_brand),
        )
        .route("/vehicles/weight", get(search_by_weight_range))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle `GET /vehicles/color/{color}/year/{year}`.
pub async fn find_by_color_and_year(
    State(state): State<AppState>,
    headers: HeaderMap,
    VehiclePath((color, year)): VehiclePath<(String, String)>,
) -> VehiclesResult {
    const OPERATION: &str = "color_and_year";
    let request_id = extract_or_generate_request_id(&headers);

    let year = parse_year_param("year", &year).map_err(|e| reject(OPERATION, &request_id, e))?;
    info!(request_id = %request_id, color = %color, year, "finding vehicles by color and year");

    let vehicles = state
        .service()
        .find_by_color_and_year(&color, year)
        .map_err(|e| fail(OPERATION, &request_id, &e))?;

    Ok(vehicles_found(OPERATION, &request_id, vehicles))
}

/// Handle `GET /vehicles/brand/{brand}/between/{start_year}/{end_year}`.
pub async fn find_by_brand_and_year_range(
    State(state): State<AppState>,
    headers: HeaderMap,
    VehiclePath((brand, start_year, end_year)): VehiclePath<(String, String, String)>,
) -> VehiclesResult {
    const OPERATION: &str = "brand_and_year_range";
    let request_id = extract_or_generate_request_id(&headers);

    let start_year = parse_year_param("start_year", &start_year)
        .map_err(|e| reject(OPERATION, &request_id, e))?;
    let end_year = parse_year_param("end_year", &end_year)
        .map_err(|e| reject(OPERATION, &request_id, e))?;
    info!(
        request_id = %request_id,
        brand = %brand,
        start_year,
        end_year,
        "finding vehicles by brand and year range"
    );

    let vehicles = state
        .service()
        .find_by_brand_and_year_range(&brand, start_year, end_year)
        .map_err(|e| fail(OPERATION, &request_id, &e))?;

    Ok(vehicles_found(OPERATION, &request_id, vehicles))
}

/// Handle `GET /vehicles/average_speed/brand/{brand}`.
pub async fn average_max_speed_by_brand(
    State(state): State<AppState>,
    headers: HeaderMap,
    VehiclePath(brand): VehiclePath<String>,
) -> Result<ServiceResponse<f64>, ApiError> {
    const OPERATION: &str = "average_speed";
    let request_id = extract_or_generate_request_id(&headers);
    info!(request_id = %request_id, brand = %brand, "computing average max speed");

    let average = state
        .service()
        .average_max_speed_by_brand(&brand)
        .map_err(|e| fail(OPERATION, &request_id, &e))?;

    record_aggregate_computed(OPERATION);
    info!(request_id = %request_id, average, "average max speed computed");
    Ok(ServiceResponse::new(MESSAGE_AVERAGE_SPEED_FOUND, average))
}

/// Handle `GET /vehicles/average_capacity/brand/{brand}`.
pub async fn average_capacity_by_brand(
    State(state): State<AppState>,
    headers: HeaderMap,
    VehiclePath(brand): VehiclePath<String>,
) -> Result<ServiceResponse<u32>, ApiError> {
    const OPERATION: &str = "average_capacity";
    let request_id = extract_or_generate_request_id(&headers);
    info!(request_id = %request_id, brand = %brand, "computing average capacity");

    let average = state
        .service()
        .average_capacity_by_brand(&brand)
        .map_err(|e| fail(OPERATION, &request_id, &e))?;

    record_aggregate_computed(OPERATION);
    info!(request_id = %request_id, average, "average capacity computed");
    Ok(ServiceResponse::new(MESSAGE_AVERAGE_CAPACITY_FOUND, average))
}

/// Handle `GET /vehicles/weight?weight_min=..&weight_max=..`.
///
/// Without either bound the search is unfiltered.
pub async fn search_by_weight_range(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
) -> VehiclesResult {
    const OPERATION: &str = "weight_range";
    let request_id = extract_or_generate_request_id(&headers);

    let (query, filtered) = WeightRangeParams::from_query(raw_query.as_deref())
        .to_search_query()
        .map_err(|e| reject(OPERATION, &request_id, e))?;
    info!(
        request_id = %request_id,
        from_weight = query.from_weight,
        to_weight = query.to_weight,
        filtered,
        "searching vehicles by weight range"
    );

    let vehicles = state
        .service()
        .search_by_weight_range(query, filtered)
        .map_err(|e| fail(OPERATION, &request_id, &e))?;

    Ok(vehicles_found(OPERATION, &request_id, vehicles))
}

fn vehicles_found(
    operation: &str,
    request_id: &RequestId,
    vehicles: VehicleMap,
) -> ServiceResponse<VehicleMap> {
    record_vehicles_returned(vehicles.len(), operation);
    info!(request_id = %request_id, count = vehicles.len(), "vehicles found");
    ServiceResponse::new(MESSAGE_VEHICLES_FOUND, vehicles)
}

fn reject(operation: &str, request_id: &RequestId, problem: ApiError) -> ApiError {
    warn!(request_id = %request_id, operation, message = %problem.message, "invalid parameter");
    record_query_failed(operation, "invalid_parameter");
    problem
}

fn fail(operation: &str, request_id: &RequestId, err: &LibError) -> ApiError {
    if err.is_not_found() {
        warn!(request_id = %request_id, operation, error = %err, "no vehicles found");
        record_query_failed(operation, "not_found");
    } else {
        error!(request_id = %request_id, operation, error = %err, "vehicle query failed");
        record_query_failed(operation, "internal_error");
    }
    from_lib_error(err)
}
