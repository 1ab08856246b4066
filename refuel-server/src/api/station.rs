//! Station endpoints

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError};
use shared::models::{NearbyStation, SellerStation, Station, StationCreate, StationUpdate};

use super::ApiResult;
use super::extract::{ApiJson, ApiPath, ApiQuery, optional_number, required_number};
use crate::auth::CurrentUser;
use crate::services::stations::{self, DEFAULT_RADIUS_KM};
use crate::state::AppState;

/// POST /api/stations
pub async fn create_station(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(req): ApiJson<StationCreate>,
) -> ApiResult<Station> {
    Ok(Json(stations::create(&state.pool, &caller, req).await?))
}

/// Raw query values, parsed by hand so bad numbers get field-level errors
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub dist: Option<String>,
}

/// GET /api/stations/nearby?lat=&lng=&dist=
pub async fn nearby_stations(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiQuery(query): ApiQuery<NearbyQuery>,
) -> ApiResult<Vec<NearbyStation>> {
    let lat = required_number(query.lat.as_deref(), "lat")?;
    let lng = required_number(query.lng.as_deref(), "lng")?;
    let dist = optional_number(query.dist.as_deref(), "dist")?.unwrap_or(DEFAULT_RADIUS_KM);

    Ok(Json(stations::find_nearby(&state.pool, &caller, lng, lat, dist).await?))
}

/// GET /api/stations/seller
pub async fn seller_stations(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> ApiResult<Vec<SellerStation>> {
    Ok(Json(stations::list_for_seller(&state.pool, &caller).await?))
}

/// PATCH /api/stations/{id}
pub async fn update_station(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(station_id): ApiPath<i64>,
    ApiJson(patch): ApiJson<StationUpdate>,
) -> ApiResult<Station> {
    Ok(Json(
        stations::update(&state.pool, &caller, station_id, patch).await?,
    ))
}

/// DELETE /api/stations/{id}
pub async fn delete_station(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(station_id): ApiPath<i64>,
) -> Result<ApiResponse, AppError> {
    stations::delete(&state.pool, &caller, station_id).await?;
    Ok(ApiResponse::message("Station removed"))
}
