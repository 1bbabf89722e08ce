use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Numeric identifier for a vehicle.
pub type VehicleId = i64;

/// Query result keyed by vehicle id.
///
/// Ordered so that repeated serialisation of the same result is byte-identical.
pub type VehicleMap = BTreeMap<VehicleId, Vehicle>;

/// Physical dimensions of a vehicle in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: f64,
    pub length: f64,
    pub width: f64,
}

/// A single vehicle record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    pub fabrication_year: i64,
    pub capacity: u32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    pub dimensions: Dimensions,
}

/// Inclusive weight bounds for a weight-range search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub from_weight: f64,
    pub to_weight: f64,
}

impl SearchQuery {
    pub fn new(from_weight: f64, to_weight: f64) -> Self {
        Self {
            from_weight,
            to_weight,
        }
    }
}

/// Immutable in-memory collection of every known vehicle.
///
/// Built once at startup and never modified afterwards; queries borrow it and
/// return freshly built [`VehicleMap`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleStore {
    vehicles: VehicleMap,
}

impl VehicleStore {
    pub fn new(vehicles: VehicleMap) -> Self {
        Self { vehicles }
    }

    /// Number of vehicles in the store.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Lookup a vehicle by identifier.
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    /// Iterate over all vehicles in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&VehicleId, &Vehicle)> {
        self.vehicles.iter()
    }

    /// Copy every vehicle matching `predicate` into a new map.
    pub fn select<F>(&self, predicate: F) -> VehicleMap
    where
        F: Fn(&Vehicle) -> bool,
    {
        self.vehicles
            .iter()
            .filter(|(_, vehicle)| predicate(vehicle))
            .map(|(id, vehicle)| (*id, vehicle.clone()))
            .collect()
    }
}

impl FromIterator<Vehicle> for VehicleStore {
    fn from_iter<I: IntoIterator<Item = Vehicle>>(iter: I) -> Self {
        Self {
            vehicles: iter.into_iter().map(|v| (v.id, v)).collect(),
        }
    }
}

impl From<VehicleMap> for VehicleStore {
    fn from(vehicles: VehicleMap) -> Self {
        Self::new(vehicles)
    }
}
