//! Extractors whose rejections use the `AppError` envelope

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};

/// JSON body
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_error(rejection)),
        }
    }
}

fn json_error(rejection: JsonRejection) -> AppError {
    let code = match &rejection {
        JsonRejection::MissingJsonContentType(_) => ErrorCode::InvalidRequest,
        _ => ErrorCode::InvalidFormat,
    };
    AppError::with_message(code, rejection.body_text())
}

/// Path parameters
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|rejection: PathRejection| {
                AppError::with_message(ErrorCode::InvalidFormat, rejection.body_text())
            })
    }
}

/// Query string
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection: QueryRejection| {
                AppError::with_message(ErrorCode::InvalidFormat, rejection.body_text())
            })
    }
}

/// Parse a required numeric query parameter
pub fn required_number(value: Option<&str>, field: &str) -> Result<f64, AppError> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::required(field))?;
    parse_number(raw, field)
}

/// Parse an optional numeric query parameter; blank counts as absent
pub fn optional_number(value: Option<&str>, field: &str) -> Result<Option<f64>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_number(raw, field).map(Some),
    }
}

fn parse_number(raw: &str, field: &str) -> Result<f64, AppError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            AppError::validation(format!("{field} must be a number")).with_detail("field", field)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_parsing() {
        assert_eq!(required_number(Some(" 12.5 "), "lat").unwrap(), 12.5);
        assert_eq!(
            required_number(None, "lat").unwrap_err().code,
            ErrorCode::RequiredField
        );
        assert_eq!(
            required_number(Some("abc"), "lat").unwrap_err().code,
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            required_number(Some("NaN"), "lat").unwrap_err().code,
            ErrorCode::ValidationFailed
        );
        assert_eq!(optional_number(Some(""), "dist").unwrap(), None);
        assert_eq!(optional_number(Some("7"), "dist").unwrap(), Some(7.0));
        assert!(optional_number(Some("far"), "dist").is_err());
    }
}
