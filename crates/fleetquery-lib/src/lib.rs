//! Fleet query library entry points.
//!
//! This crate loads the vehicle dataset into an immutable in-memory store and
//! answers the read-only queries the HTTP service exposes. It is layered as a
//! [`VehicleRepository`] (plain filtering over the store) under a
//! [`VehicleService`] (aggregation and "no vehicles" classification).
//! Higher-level consumers should depend on the traits exported here rather
//! than on the concrete types, so that tests can substitute doubles.
//!

#![deny(warnings)]

pub mod error;
pub mod loader;
pub mod repository;
pub mod service;
pub mod vehicle;

#[cfg(test)]
mod test_helpers;

pub use error::{Error, Result};
pub use loader::{load_vehicles, parse_vehicles};
pub use repository::{VehicleRepository, VehicleStoreRepository};
pub use service::{DefaultVehicleService, VehicleService};
pub use vehicle::{Dimensions, SearchQuery, Vehicle, VehicleId, VehicleMap, VehicleStore};
