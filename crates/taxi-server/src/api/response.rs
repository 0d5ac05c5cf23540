//! API response types
//!
//! Every view answers with one of these envelopes, or with a `302 Found`
//! redirect built by [`found`].

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Standard response wrapper
///
/// `success` is false only for a form rendered back with field errors.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new success response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }

    /// Context that was rendered but not accepted (e.g. an invalid form)
    pub fn failure(data: T) -> Self {
        Self {
            success: false,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Standard error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    /// `404 Not Found` with this body
    pub fn not_found(message: impl Into<String>) -> Response {
        (StatusCode::NOT_FOUND, Json(Self::new("NOT_FOUND", message))).into_response()
    }

    /// `500` that hides the cause from the client
    pub fn internal(message: impl Into<String>) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Self::new("INTERNAL_ERROR", message)),
        )
            .into_response()
    }
}

/// `302 Found` pointing at `location`
pub fn found(location: impl Into<String>) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.into())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_failure_envelope() {
        let json = serde_json::to_value(ApiResponse::failure("form")).unwrap();
        assert_eq!(json["success"], false);
    }

    #[test]
    fn test_error_response_shape() {
        let err = ErrorResponse::new("CONFLICT", "Manufacturer still has cars");
        let json = serde_json::to_value(err).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "CONFLICT");
        assert_eq!(json["error"]["message"], "Manufacturer still has cars");
    }

    #[test]
    fn test_found_sets_location() {
        let response = found("/drivers/");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/drivers/");
    }
}
