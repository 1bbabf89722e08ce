//! Query orchestration and aggregation over a [`VehicleRepository`].
//!
//! This is the only layer that turns "no rows" into an error, and only for the
//! brand aggregates. The plain finders pass empty results straight through.

use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::repository::VehicleRepository;
use crate::vehicle::{SearchQuery, VehicleMap};

/// Query capability the HTTP handlers depend on.
pub trait VehicleService: Send + Sync {
    /// Vehicles with the given color and fabrication year.
    fn find_by_color_and_year(&self, color: &str, fabrication_year: i64) -> Result<VehicleMap>;

    /// Vehicles of `brand` fabricated in the inclusive year range.
    fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i64,
        end_year: i64,
    ) -> Result<VehicleMap>;

    /// Arithmetic mean of `max_speed` across the brand's vehicles.
    ///
    /// # Errors
    ///
    /// [`Error::NoVehiclesFound`] if the brand has no vehicles, or the
    /// repository error unchanged if the lookup fails.
    fn average_max_speed_by_brand(&self, brand: &str) -> Result<f64>;

    /// Mean passenger capacity across the brand's vehicles, truncated toward zero.
    ///
    /// # Errors
    ///
    /// Same as [`VehicleService::average_max_speed_by_brand`].
    fn average_capacity_by_brand(&self, brand: &str) -> Result<u32>;

    /// Weight-range search.
    ///
    /// With `filtered` set, returns vehicles within the query's inclusive
    /// bounds. Without it, the bounds are ignored and every vehicle is
    /// returned.
    fn search_by_weight_range(&self, query: SearchQuery, filtered: bool) -> Result<VehicleMap>;
}

/// Default service backed by any repository implementation.
#[derive(Clone)]
pub struct DefaultVehicleService {
    repository: Arc<dyn VehicleRepository>,
}

impl DefaultVehicleService {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    fn vehicles_of_brand(&self, brand: &str) -> Result<VehicleMap> {
        let vehicles = self.repository.find_by_brand(brand)?;
        if vehicles.is_empty() {
            debug!(brand, "no vehicles for brand");
            return Err(Error::NoVehiclesFound {
                brand: brand.to_string(),
            });
        }
        Ok(vehicles)
    }
}

impl std::fmt::Debug for DefaultVehicleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultVehicleService").finish_non_exhaustive()
    }
}

impl VehicleService for DefaultVehicleService {
    fn find_by_color_and_year(&self, color: &str, fabrication_year: i64) -> Result<VehicleMap> {
        self.repository.find_by_color_and_year(color, fabrication_year)
    }

    fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i64,
        end_year: i64,
    ) -> Result<VehicleMap> {
        self.repository
            .find_by_brand_and_year_range(brand, start_year, end_year)
    }

    fn average_max_speed_by_brand(&self, brand: &str) -> Result<f64> {
        let vehicles = self.vehicles_of_brand(brand)?;
        let total: f64 = vehicles.values().map(|v| v.max_speed).sum();
        Ok(total / vehicles.len() as f64)
    }

    fn average_capacity_by_brand(&self, brand: &str) -> Result<u32> {
        let vehicles = self.vehicles_of_brand(brand)?;
        let total: u64 = vehicles.values().map(|v| u64::from(v.capacity)).sum();
        // The mean of u32 values always fits back into a u32.
        Ok((total / vehicles.len() as u64) as u32)
    }

    fn search_by_weight_range(&self, query: SearchQuery, filtered: bool) -> Result<VehicleMap> {
        if filtered {
            self.repository
                .find_by_weight_range(query.from_weight, query.to_weight)
        } else {
            self.repository.find_all()
        }
    }
}
