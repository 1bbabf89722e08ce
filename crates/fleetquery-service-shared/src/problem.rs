//! Error envelope for failed HTTP requests.
//!
//! Every failure is rendered as `{"status": <reason phrase>, "message": ...}`
//! with the matching status code and an `application/json` content type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use fleetquery_lib::Error as LibError;

/// Message returned when a brand aggregate matched no vehicles.
pub const MESSAGE_NOT_FOUND: &str = "vehicles not found";

/// Message returned for every unclassified failure.
pub const MESSAGE_INTERNAL_ERROR: &str = "internal error";

/// Error response body plus the status code it is sent with.
///
/// # Example
///
/// ```
/// use fleetquery_service_shared::ApiError;
/// use axum::http::StatusCode;
///
/// let error = ApiError::bad_request("invalid year");
/// assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(error.status, "Bad Request");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP reason phrase, e.g. "Not Found".
    pub status: String,

    /// Client-facing explanation.
    pub message: String,

    #[serde(skip)]
    code: u16,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.canonical_reason().unwrap_or_default().to_string(),
            message: message.into(),
            code: status.as_u16(),
        }
    }

    /// 400 for a malformed request parameter.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 for a brand aggregate without vehicles.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, MESSAGE_NOT_FOUND)
    }

    /// 500 for anything else; the cause is never exposed.
    pub fn internal_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MESSAGE_INTERNAL_ERROR)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Classify a library error into its HTTP response.
pub fn from_lib_error(error: &LibError) -> ApiError {
    if error.is_not_found() {
        ApiError::not_found()
    } else {
        ApiError::internal_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_uses_reason_phrase() {
        let error = ApiError::bad_request("invalid start_year");
        assert_eq!(error.status, "Bad Request");
        assert_eq!(error.message, "invalid start_year");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_serialization_has_only_status_and_message() {
        let json = serde_json::to_value(ApiError::not_found()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "Not Found", "message": "vehicles not found"})
        );
    }

    #[test]
    fn test_from_lib_error_not_found() {
        let error = LibError::NoVehiclesFound {
            brand: "Chevrolet".to_string(),
        };
        let api = from_lib_error(&error);
        assert_eq!(api.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(api.message, MESSAGE_NOT_FOUND);
    }

    #[test]
    fn test_from_lib_error_hides_cause() {
        let error = LibError::Repository {
            message: "disk on fire".to_string(),
        };
        let api = from_lib_error(&error);
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.status, "Internal Server Error");
        assert!(!api.message.contains("disk"));
    }

    #[test]
    fn test_into_response_sets_status_and_json() {
        let response = ApiError::bad_request("invalid year").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }
}
