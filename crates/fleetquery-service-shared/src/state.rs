//! Application state for the HTTP service.
//!
//! Handlers reach the query pipeline through the [`VehicleService`] held
//! here, never through the store directly.

use std::path::Path;
use std::sync::Arc;

use fleetquery_lib::{
    load_vehicles, DefaultVehicleService, Error as LibError, VehicleService, VehicleStore,
    VehicleStoreRepository,
};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Dataset file not found.
    DatasetNotFound(String),

    /// Failed to read or decode the dataset.
    DatasetLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetNotFound(path) => write!(f, "dataset not found: {}", path),
            Self::DatasetLoad(e) => write!(f, "failed to load vehicles: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DatasetLoad(e) => Some(e),
            Self::DatasetNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::DatasetNotFound { path } => Self::DatasetNotFound(path.display().to_string()),
            other => Self::DatasetLoad(other),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone; share it via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use fleetquery_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let service = state.service();
///     // ... query vehicles
/// }
///
/// let state = AppState::load("path/to/vehicles.json").unwrap();
/// let app = Router::new()
///     .route("/vehicles/brand/{brand}", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    service: Arc<dyn VehicleService>,
    vehicle_count: usize,
}

impl AppState {
    /// Load application state from a JSON dataset file.
    pub fn load(data_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let data_path = data_path.as_ref();

        tracing::info!(path = %data_path.display(), "loading vehicles");
        let store = load_vehicles(data_path)?;
        tracing::info!(vehicle_count = store.len(), "vehicles loaded successfully");

        Ok(Self::from_store(store))
    }

    /// Build the default repository and service over an already loaded store.
    pub fn from_store(store: VehicleStore) -> Self {
        let vehicle_count = store.len();
        let repository = Arc::new(VehicleStoreRepository::new(store));
        let service = Arc::new(DefaultVehicleService::new(repository));
        Self::from_service(service, vehicle_count)
    }

    /// Wrap an arbitrary service implementation.
    ///
    /// `vehicle_count` feeds the readiness probe only.
    pub fn from_service(service: Arc<dyn VehicleService>, vehicle_count: usize) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                service,
                vehicle_count,
            }),
        }
    }

    /// Access the query service.
    pub fn service(&self) -> &dyn VehicleService {
        self.inner.service.as_ref()
    }

    /// Number of vehicles in the loaded store.
    pub fn vehicle_count(&self) -> usize {
        self.inner.vehicle_count
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("vehicle_count", &self.inner.vehicle_count)
            .finish()
    }
}
