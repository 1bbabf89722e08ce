use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the fleet query library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised by the aggregate operations when a brand has no vehicles.
    #[error("no vehicles found for brand {brand}")]
    NoVehiclesFound { brand: String },

    /// Raised when the underlying vehicle lookup fails.
    #[error("repository lookup failed: {message}")]
    Repository { message: String },

    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for dataset decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error means "the query matched nothing" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NoVehiclesFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_vehicles_found_is_not_found() {
        let error = Error::NoVehiclesFound {
            brand: "Chevrolet".to_string(),
        };
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "no vehicles found for brand Chevrolet");
    }

    #[test]
    fn repository_error_is_not_not_found() {
        let error = Error::Repository {
            message: "boom".to_string(),
        };
        assert!(!error.is_not_found());
        assert!(error.to_string().contains("boom"));
    }
}
