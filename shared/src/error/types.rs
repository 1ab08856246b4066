//! `AppError` and the JSON envelope it is rendered into

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error surfaced by every public operation: a code, a client-facing
/// message and optional structured details (offending field, allowed values).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error carrying the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach one detail entry
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Missing input, naming the field
    pub fn required(field: &str) -> Self {
        Self::new(ErrorCode::RequiredField).with_detail("field", field)
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Third-party service unreachable or returned an unusable body
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::UpstreamError, msg)
    }
}

/// JSON body for errors and message-only successes:
/// `{code, message, details?}` with `code` 0 on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Success body carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success.code(),
            message: message.into(),
            details: None,
        }
    }

    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }

    /// Status implied by `code`; unknown codes are reported as 500
    pub fn http_status(&self) -> StatusCode {
        ErrorCode::try_from(self.code)
            .map(|c| c.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "System error occurred");
        }
        let body = ApiResponse::error(&self);
        (self.http_status(), axum::Json(body)).into_response()
    }
}

impl axum::response::IntoResponse for ApiResponse {
    fn into_response(self) -> axum::response::Response {
        (self.http_status(), axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_new_uses_default_message() {
        let err = AppError::new(ErrorCode::StationNotFound);
        assert_eq!(err.code, ErrorCode::StationNotFound);
        assert_eq!(err.message, "Station not found");
        assert!(err.details.is_none());
        assert_eq!(err.to_string(), "Station not found");
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::validation("Invalid fuel type")
            .with_detail("field", "fuelType")
            .with_detail("allowed", serde_json::json!(["diesel", "petrol"]));

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details["field"], "fuelType");
        assert_eq!(details["allowed"], serde_json::json!(["diesel", "petrol"]));
    }

    #[test]
    fn test_required_names_field() {
        let err = AppError::required("stationId");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.details.unwrap()["field"], "stationId");
    }

    #[test]
    fn test_auth_constructors() {
        assert_eq!(AppError::unauthorized().code, ErrorCode::NotAuthenticated);
        assert_eq!(AppError::token_expired().code, ErrorCode::TokenExpired);
        assert_eq!(
            AppError::invalid_credentials().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::upstream("down").http_status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_error_envelope() {
        let err = AppError::new(ErrorCode::NotStationOwner).with_detail("stationId", 7);
        let body = serde_json::to_value(ApiResponse::error(&err)).unwrap();
        assert_eq!(body["code"], 2003);
        assert_eq!(body["message"], "Not authorized for this station");
        assert_eq!(body["details"]["stationId"], 7);
    }

    #[test]
    fn test_message_envelope() {
        let response = ApiResponse::message("Station removed");
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"code":0,"message":"Station removed"}"#);
        assert_eq!(response.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::new(ErrorCode::OrderInvalidTransition).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let response = ApiResponse::message("ok").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let response = ApiResponse {
            code: 4242,
            message: "?".into(),
            details: None,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
