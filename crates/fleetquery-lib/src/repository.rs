//! Read-only queries over the in-memory vehicle store.
//!
//! Every query returns a freshly built [`VehicleMap`]; an empty map is a
//! valid answer and never an error at this layer.

use tracing::debug;

use crate::error::Result;
use crate::vehicle::{VehicleMap, VehicleStore};

/// Lookup capability the service layer depends on.
///
/// String comparisons are exact and case-sensitive. Numeric ranges are
/// inclusive on both ends.
pub trait VehicleRepository: Send + Sync {
    /// Every vehicle in the store.
    fn find_all(&self) -> Result<VehicleMap>;

    /// Vehicles with the given color and fabrication year.
    fn find_by_color_and_year(&self, color: &str, fabrication_year: i64) -> Result<VehicleMap>;

    /// Vehicles of `brand` fabricated between `start_year` and `end_year`.
    fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i64,
        end_year: i64,
    ) -> Result<VehicleMap>;

    /// Vehicles of `brand`.
    fn find_by_brand(&self, brand: &str) -> Result<VehicleMap>;

    /// Vehicles weighing between `from_weight` and `to_weight`.
    fn find_by_weight_range(&self, from_weight: f64, to_weight: f64) -> Result<VehicleMap>;
}

/// Repository backed by a [`VehicleStore`] it owns.
#[derive(Debug, Clone, Default)]
pub struct VehicleStoreRepository {
    store: VehicleStore,
}

impl VehicleStoreRepository {
    pub fn new(store: VehicleStore) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &VehicleStore {
        &self.store
    }
}

impl VehicleRepository for VehicleStoreRepository {
    fn find_all(&self) -> Result<VehicleMap> {
        Ok(self.store.select(|_| true))
    }

    fn find_by_color_and_year(&self, color: &str, fabrication_year: i64) -> Result<VehicleMap> {
        let found = self
            .store
            .select(|v| v.color == color && v.fabrication_year == fabrication_year);
        debug!(color, fabrication_year, matches = found.len(), "find by color and year");
        Ok(found)
    }

    fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i64,
        end_year: i64,
    ) -> Result<VehicleMap> {
        let found = self.store.select(|v| {
            v.brand == brand && (start_year..=end_year).contains(&v.fabrication_year)
        });
        debug!(brand, start_year, end_year, matches = found.len(), "find by brand and year range");
        Ok(found)
    }

    fn find_by_brand(&self, brand: &str) -> Result<VehicleMap> {
        let found = self.store.select(|v| v.brand == brand);
        debug!(brand, matches = found.len(), "find by brand");
        Ok(found)
    }

    fn find_by_weight_range(&self, from_weight: f64, to_weight: f64) -> Result<VehicleMap> {
        let found = self
            .store
            .select(|v| v.weight >= from_weight && v.weight <= to_weight);
        debug!(from_weight, to_weight, matches = found.len(), "find by weight range");
        Ok(found)
    }
}
