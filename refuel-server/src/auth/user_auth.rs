//! User JWT authentication
//!
//! Tokens are read from the `x-auth-token` header, falling back to
//! `Authorization: Bearer <token>`.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::UserRole;

use crate::state::AppState;

pub const TOKEN_HEADER: &str = "x-auth-token";

/// JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct UserClaims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated caller extracted from the token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_seller(&self) -> bool {
        self.role.is_seller()
    }

    /// Reject callers that are not sellers
    pub fn require_seller(&self) -> Result<(), AppError> {
        if self.is_seller() {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::SellerRequired))
        }
    }
}

/// Create a signed token for a user
pub fn create_token(
    user_id: i64,
    email: &str,
    role: UserRole,
    secret: &str,
    expiry_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = UserClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp: (now + chrono::Duration::hours(expiry_hours)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token and return the caller it identifies
pub fn verify_token(token: &str, secret: &str) -> Result<CurrentUser, AppError> {
    let token_data = jsonwebtoken::decode::<UserClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::token_expired(),
            _ => AppError::new(ErrorCode::TokenInvalid),
        }
    })?;

    let user_id = token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::new(ErrorCode::TokenInvalid))?;

    Ok(CurrentUser {
        user_id,
        email: token_data.claims.email,
        role: token_data.claims.role,
    })
}

fn extract_token(request: &Request) -> Option<&str> {
    token_from_headers(request.headers())
}

fn token_from_headers(headers: &http::HeaderMap) -> Option<&str> {
    if let Some(token) = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return Some(token);
    }
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware that verifies the token and stores [`CurrentUser`] in request extensions
pub async fn user_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request).ok_or_else(AppError::unauthorized)?;
    let user = verify_token(token, &state.jwt_secret)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Handler extractor. Reuses the identity stored by the middleware, otherwise
/// verifies the token itself.
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let token = token_from_headers(&parts.headers).ok_or_else(AppError::unauthorized)?;
        let user = verify_token(token, &state.jwt_secret)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_token_roundtrip() {
        let token = create_token(42, "a@b.c", UserRole::Seller, SECRET, 24).unwrap();
        let user = verify_token(&token, SECRET).unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.email, "a@b.c");
        assert!(user.is_seller());
        assert!(user.require_seller().is_ok());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token(1, "a@b.c", UserRole::Customer, SECRET, 24).unwrap();
        let err = verify_token(&token, "other").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_expired_token() {
        let token = create_token(1, "a@b.c", UserRole::Customer, SECRET, -2).unwrap();
        let err = verify_token(&token, SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenExpired);
    }

    #[test]
    fn test_customer_is_not_seller() {
        let user = CurrentUser {
            user_id: 1,
            email: String::new(),
            role: UserRole::Customer,
        };
        assert_eq!(
            user.require_seller().unwrap_err().code,
            ErrorCode::SellerRequired
        );
    }

    #[test]
    fn test_token_header_precedence() {
        let request = Request::builder()
            .header(TOKEN_HEADER, "primary")
            .header("Authorization", "Bearer fallback")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(extract_token(&request), Some("primary"));

        let request = Request::builder()
            .header("Authorization", "Bearer fallback")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(extract_token(&request), Some("fallback"));

        let request = Request::builder()
            .header("Authorization", "Basic xyz")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(extract_token(&request), None);
    }
}
