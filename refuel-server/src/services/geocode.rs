//! Reverse geocoding pass-through (Nominatim-compatible)

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::Value;
use shared::error::AppError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Reverse geocoding failure
#[derive(Debug)]
pub enum GeocodeError {
    /// Upstream answered with a non-2xx status; passed through to the client
    Rejected { status: StatusCode, details: Value },
    /// Upstream unreachable or returned something that is not JSON
    Unavailable(String),
}

impl IntoResponse for GeocodeError {
    fn into_response(self) -> Response {
        match self {
            GeocodeError::Rejected { status, details } => {
                let body = serde_json::json!({
                    "message": "Geocoding API Error",
                    "details": details,
                });
                (status, Json(body)).into_response()
            }
            GeocodeError::Unavailable(reason) => {
                tracing::warn!(reason = %reason, "Geocoder unavailable");
                AppError::upstream("Failed to connect to geocoding service").into_response()
            }
        }
    }
}

/// HTTP client for the reverse geocoding service
#[derive(Clone)]
pub struct Geocoder {
    client: reqwest::Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, BoxError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up the address at a point. No retries.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Value, GeocodeError> {
        let url = format!("{}/reverse", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
            ])
            .send()
            .await
            .map_err(|e| GeocodeError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let details = serde_json::from_str(&text).unwrap_or(Value::String(text));
            tracing::warn!(status = %status, "Geocoder rejected request");
            return Err(GeocodeError::Rejected { status, details });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| GeocodeError::Unavailable(e.to_string()))
    }
}
