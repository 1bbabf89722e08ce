//! Success envelope for HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Message for the three vehicle finders.
pub const MESSAGE_VEHICLES_FOUND: &str = "vehicles found";

/// Message for the average max speed aggregate.
pub const MESSAGE_AVERAGE_SPEED_FOUND: &str = "average max speed found";

/// Message for the average capacity aggregate.
pub const MESSAGE_AVERAGE_CAPACITY_FOUND: &str = "average capacity found";

/// Wrapper for successful responses: `{"message": ..., "data": ...}`.
///
/// Always sent with status 200 and an `application/json` content type.
///
/// # Example
///
/// ```
/// use fleetquery_service_shared::{ServiceResponse, MESSAGE_AVERAGE_SPEED_FOUND};
///
/// let response = ServiceResponse::new(MESSAGE_AVERAGE_SPEED_FOUND, 180.0);
/// assert_eq!(response.message, "average max speed found");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// Operation-specific success message.
    pub message: String,

    /// The actual response payload.
    pub data: T,
}

impl<T> ServiceResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetquery_lib::VehicleMap;

    #[test]
    fn test_response_serialization() {
        let response = ServiceResponse::new(MESSAGE_AVERAGE_CAPACITY_FOUND, 5u32);
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"message":"average capacity found","data":5}"#);
    }

    #[test]
    fn test_empty_map_serializes_as_object() {
        let response = ServiceResponse::new(MESSAGE_VEHICLES_FOUND, VehicleMap::new());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"], serde_json::json!({}));
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"message":"average max speed found","data":180.0}"#;
        let response: ServiceResponse<f64> = serde_json::from_str(json).unwrap();
        assert_eq!(response.data, 180.0);
        assert_eq!(response.message, MESSAGE_AVERAGE_SPEED_FOUND);
    }

    #[test]
    fn test_into_response_is_ok() {
        let response = ServiceResponse::new(MESSAGE_VEHICLES_FOUND, VehicleMap::new()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
