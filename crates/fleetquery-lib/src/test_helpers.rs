// Test-only helpers for `fleetquery-lib` tests
#![allow(dead_code)]
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::repository::VehicleRepository;
use crate::vehicle::{Dimensions, Vehicle, VehicleId, VehicleMap, VehicleStore};

/// Builder to create `Vehicle` instances in tests with sensible defaults.
pub struct VehicleBuilder {
    vehicle: Vehicle,
}

impl VehicleBuilder {
    #[must_use]
    pub fn new(id: VehicleId) -> Self {
        Self {
            vehicle: Vehicle {
                id,
                brand: "Ford".to_string(),
                model: "Fiesta".to_string(),
                registration: format!("ABC-{}", 1233 + id),
                color: "Red".to_string(),
                fabrication_year: 2010,
                capacity: 5,
                max_speed: 180.0,
                fuel_type: "Gasoline".to_string(),
                transmission: "Manual".to_string(),
                weight: 1000.0,
                dimensions: Dimensions {
                    height: 1.5,
                    length: 4.0,
                    width: 1.8,
                },
            },
        }
    }

    pub fn brand(mut self, brand: &str) -> Self {
        self.vehicle.brand = brand.to_string();
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.vehicle.model = model.to_string();
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.vehicle.color = color.to_string();
        self
    }

    pub fn year(mut self, year: i64) -> Self {
        self.vehicle.fabrication_year = year;
        self
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.vehicle.capacity = capacity;
        self
    }

    pub fn max_speed(mut self, max_speed: f64) -> Self {
        self.vehicle.max_speed = max_speed;
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.vehicle.weight = weight;
        self
    }

    pub fn build(self) -> Vehicle {
        self.vehicle
    }
}

pub fn ford_fiesta() -> Vehicle {
    VehicleBuilder::new(1).build()
}

pub fn ford_focus() -> Vehicle {
    VehicleBuilder::new(2)
        .model("Focus")
        .color("Blue")
        .weight(1100.0)
        .build()
}

pub fn fiat_uno() -> Vehicle {
    VehicleBuilder::new(3)
        .brand("Fiat")
        .model("Uno")
        .year(2012)
        .weight(1200.0)
        .build()
}

/// The three-vehicle store most tests run against.
pub fn fixture_store() -> VehicleStore {
    vec![ford_fiesta(), ford_focus(), fiat_uno()]
        .into_iter()
        .collect()
}

/// A call observed by [`StubRepository`].
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryCall {
    FindAll,
    FindByColorAndYear(String, i64),
    FindByBrandAndYearRange(String, i64, i64),
    FindByBrand(String),
    FindByWeightRange(f64, f64),
}

/// Repository double that answers every query with a canned result and
/// records the calls it receives.
pub struct StubRepository {
    result: std::result::Result<VehicleMap, String>,
    calls: Mutex<Vec<RepositoryCall>>,
}

impl StubRepository {
    pub fn returning(vehicles: VehicleMap) -> Self {
        Self {
            result: Ok(vehicles),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RepositoryCall> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: RepositoryCall) -> Result<VehicleMap> {
        self.calls.lock().unwrap().push(call);
        self.result.clone().map_err(|message| Error::Repository { message })
    }
}

impl VehicleRepository for StubRepository {
    fn find_all(&self) -> Result<VehicleMap> {
        self.answer(RepositoryCall::FindAll)
    }

    fn find_by_color_and_year(&self, color: &str, fabrication_year: i64) -> Result<VehicleMap> {
        self.answer(RepositoryCall::FindByColorAndYear(
            color.to_string(),
            fabrication_year,
        ))
    }

    fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i64,
        end_year: i64,
    ) -> Result<VehicleMap> {
        self.answer(RepositoryCall::FindByBrandAndYearRange(
            brand.to_string(),
            start_year,
            end_year,
        ))
    }

    fn find_by_brand(&self, brand: &str) -> Result<VehicleMap> {
        self.answer(RepositoryCall::FindByBrand(brand.to_string()))
    }

    fn find_by_weight_range(&self, from_weight: f64, to_weight: f64) -> Result<VehicleMap> {
        self.answer(RepositoryCall::FindByWeightRange(from_weight, to_weight))
    }
}
