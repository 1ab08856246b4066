//! Utility endpoints

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use super::extract::{ApiQuery, required_number};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// GET /api/utility/geocode?lat=&lng=
///
/// Upstream error statuses are passed through, so errors here are full responses.
pub async fn reverse_geocode(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<GeocodeQuery>,
) -> Result<Json<Value>, Response> {
    let lat = required_number(query.lat.as_deref(), "lat").map_err(IntoResponse::into_response)?;
    let lng = required_number(query.lng.as_deref(), "lng").map_err(IntoResponse::into_response)?;

    let body = state
        .geocoder
        .reverse(lat, lng)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(Json(body))
}
