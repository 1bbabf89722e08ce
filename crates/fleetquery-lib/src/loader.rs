use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::vehicle::{Dimensions, Vehicle, VehicleId, VehicleStore};

/// Flat on-disk layout of a vehicle record.
#[derive(Debug, Clone, Deserialize)]
struct VehicleRecord {
    id: VehicleId,
    brand: String,
    model: String,
    registration: String,
    color: String,
    year: i64,
    passengers: u32,
    max_speed: f64,
    fuel_type: String,
    transmission: String,
    weight: f64,
    height: f64,
    length: f64,
    width: f64,
}

impl From<VehicleRecord> for Vehicle {
    fn from(record: VehicleRecord) -> Self {
        Vehicle {
            id: record.id,
            brand: record.brand,
            model: record.model,
            registration: record.registration,
            color: record.color,
            fabrication_year: record.year,
            capacity: record.passengers,
            max_speed: record.max_speed,
            fuel_type: record.fuel_type,
            transmission: record.transmission,
            weight: record.weight,
            dimensions: Dimensions {
                height: record.height,
                length: record.length,
                width: record.width,
            },
        }
    }
}

/// Load the vehicle store from a JSON dataset on disk.
///
/// The file must contain a JSON array of flat vehicle records. When two
/// records share an id the later one wins.
pub fn load_vehicles(path: &Path) -> Result<VehicleStore> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), "loading vehicles");
    let raw = fs::read_to_string(path)?;
    let store = parse_vehicles(&raw)?;
    info!(path = %path.display(), vehicle_count = store.len(), "vehicles loaded");
    Ok(store)
}

/// Parse the vehicle store from an in-memory JSON document.
pub fn parse_vehicles(raw: &str) -> Result<VehicleStore> {
    let records: Vec<VehicleRecord> = serde_json::from_str(raw)?;

    let mut vehicles = BTreeMap::new();
    for record in records {
        let vehicle = Vehicle::from(record);
        let id = vehicle.id;
        if vehicles.insert(id, vehicle).is_some() {
            warn!(id, "duplicate vehicle id in dataset; keeping the later record");
        }
    }

    Ok(VehicleStore::new(vehicles))
}
