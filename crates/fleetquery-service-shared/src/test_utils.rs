//! Test utilities for handler testing.
//!
//! Provides an [`AppState`] loaded from the JSON fixture dataset and a
//! recording [`VehicleService`] double for asserting which service calls a
//! handler made.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use fleetquery_lib::{Error, Result, SearchQuery, VehicleMap, VehicleService};

use crate::state::AppState;

/// Path to the test fixture dataset.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/vehicles.json"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Shared test AppState loaded from the fixture dataset.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let path = PathBuf::from(TEST_FIXTURE_PATH);
            AppState::load(&path)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
        })
        .clone()
}

/// A call observed by [`RecordingService`].
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    FindByColorAndYear(String, i64),
    FindByBrandAndYearRange(String, i64, i64),
    AverageMaxSpeedByBrand(String),
    AverageCapacityByBrand(String),
    SearchByWeightRange(SearchQuery, bool),
}

/// What a [`RecordingService`] answers with.
#[derive(Debug, Clone)]
pub enum Canned {
    Vehicles(VehicleMap),
    Speed(f64),
    Capacity(u32),
    NoVehicles,
    Failure(String),
}

/// Service double that records every call and answers from a [`Canned`] value.
///
/// Asking for a result of the wrong kind (e.g. `Canned::Speed` from a finder)
/// yields a repository error, which the handlers map to a 500.
#[derive(Debug)]
pub struct RecordingService {
    canned: Canned,
    calls: Mutex<Vec<ServiceCall>>,
}

impl RecordingService {
    pub fn new(canned: Canned) -> Arc<Self> {
        Arc::new(Self {
            canned,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// State wrapping this double.
    pub fn state(self: &Arc<Self>) -> AppState {
        AppState::from_service(self.clone(), 1)
    }

    fn record(&self, call: ServiceCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure<T>(&self) -> Result<T> {
        match &self.canned {
            Canned::NoVehicles => Err(Error::NoVehiclesFound {
                brand: "test".to_string(),
            }),
            Canned::Failure(message) => Err(Error::Repository {
                message: message.clone(),
            }),
            other => Err(Error::Repository {
                message: format!("unexpected canned value {:?}", other),
            }),
        }
    }

    fn vehicles(&self) -> Result<VehicleMap> {
        match &self.canned {
            Canned::Vehicles(map) => Ok(map.clone()),
            _ => self.failure(),
        }
    }
}

impl VehicleService for RecordingService {
    fn find_by_color_and_year(&self, color: &str, fabrication_year: i64) -> Result<VehicleMap> {
        self.record(ServiceCall::FindByColorAndYear(
            color.to_string(),
            fabrication_year,
        ));
        self.vehicles()
    }

    fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i64,
        end_year: i64,
    ) -> Result<VehicleMap> {
        self.record(ServiceCall::FindByBrandAndYearRange(
            brand.to_string(),
            start_year,
            end_year,
        ));
        self.vehicles()
    }

    fn average_max_speed_by_brand(&self, brand: &str) -> Result<f64> {
        self.record(ServiceCall::AverageMaxSpeedByBrand(brand.to_string()));
        match &self.canned {
            Canned::Speed(speed) => Ok(*speed),
            _ => self.failure(),
        }
    }

    fn average_capacity_by_brand(&self, brand: &str) -> Result<u32> {
        self.record(ServiceCall::AverageCapacityByBrand(brand.to_string()));
        match &self.canned {
            Canned::Capacity(capacity) => Ok(*capacity),
            _ => self.failure(),
        }
    }

    fn search_by_weight_range(&self, query: SearchQuery, filtered: bool) -> Result<VehicleMap> {
        self.record(ServiceCall::SearchByWeightRange(query, filtered));
        self.vehicles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_loads_successfully() {
        let state = test_state();
        assert_eq!(state.vehicle_count(), 6);
    }

    #[test]
    fn test_recording_service_records_calls() {
        let service = RecordingService::new(Canned::Speed(180.0));
        assert_eq!(service.average_max_speed_by_brand("Ford").unwrap(), 180.0);
        assert!(service.find_by_color_and_year("Red", 2010).is_err());
        assert_eq!(
            service.calls(),
            vec![
                ServiceCall::AverageMaxSpeedByBrand("Ford".to_string()),
                ServiceCall::FindByColorAndYear("Red".to_string(), 2010),
            ]
        );
    }

    #[test]
    fn test_recording_service_not_found() {
        let service = RecordingService::new(Canned::NoVehicles);
        assert!(service
            .average_capacity_by_brand("Chevrolet")
            .unwrap_err()
            .is_not_found());
    }
}
