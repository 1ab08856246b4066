//! Station registry and nearby-station search

use std::collections::HashMap;

use shared::error::{AppError, ErrorCode};
use shared::models::{
    GeoPoint, NearbyStation, SellerStation, Station, StationCreate, StationStatus, StationUpdate,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use super::money;
use crate::auth::CurrentUser;
use crate::db::{orders, stations};
use crate::error::ServiceResult;
use crate::geo::{BoundingBox, haversine_km};
use crate::util::non_blank;

/// Default search radius in km
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

fn check_price(value: f64, field: &str) -> Result<f64, AppError> {
    if !money::is_valid_price(value) {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!(
                "{field} must be a non-negative number no greater than {}",
                money::MAX_PRICE
            ),
        )
        .with_detail("field", field)
        .with_detail("max", money::MAX_PRICE));
    }
    Ok(value)
}

fn parse_status(status: &str) -> Result<StationStatus, AppError> {
    StationStatus::from_db(status.trim()).ok_or_else(|| {
        AppError::new(ErrorCode::InvalidStationStatus)
            .with_detail("allowed", serde_json::json!(["active", "inactive"]))
    })
}

/// Load a station and check the caller owns it
async fn owned_station(
    pool: &SqlitePool,
    caller: &CurrentUser,
    station_id: i64,
) -> ServiceResult<Station> {
    let station = stations::find_by_id(pool, station_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StationNotFound))?;
    if station.seller_id != caller.user_id {
        return Err(AppError::new(ErrorCode::NotStationOwner).into());
    }
    Ok(station)
}

/// Register a station owned by the calling seller
pub async fn create(
    pool: &SqlitePool,
    caller: &CurrentUser,
    req: StationCreate,
) -> ServiceResult<Station> {
    caller.require_seller()?;

    let name = non_blank(req.name.as_deref()).ok_or_else(|| AppError::required("name"))?;
    let address =
        non_blank(req.address.as_deref()).ok_or_else(|| AppError::required("address"))?;
    let location = req.location.ok_or_else(|| AppError::required("location"))?;
    let diesel_price = req
        .diesel_price
        .ok_or_else(|| AppError::required("dieselPrice"))?;
    let petrol_price = req
        .petrol_price
        .ok_or_else(|| AppError::required("petrolPrice"))?;

    let location = GeoPoint::try_from(location).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidLocation, e.to_string())
            .with_detail("field", "location")
    })?;

    let now = now_millis();
    let station = Station {
        id: snowflake_id(),
        seller_id: caller.user_id,
        name: name.to_string(),
        address: address.to_string(),
        location,
        diesel_price: check_price(diesel_price, "dieselPrice")?,
        petrol_price: check_price(petrol_price, "petrolPrice")?,
        status: None,
        created_at: now,
        updated_at: now,
    };
    stations::insert(pool, &station).await?;

    tracing::info!(
        station_id = station.id,
        seller_id = station.seller_id,
        "Station created"
    );
    Ok(station)
}

/// Apply a partial update to a station the caller owns
pub async fn update(
    pool: &SqlitePool,
    caller: &CurrentUser,
    station_id: i64,
    patch: StationUpdate,
) -> ServiceResult<Station> {
    let mut station = owned_station(pool, caller, station_id).await?;

    if let Some(name) = patch.name {
        station.name = non_blank(Some(name.as_str()))
            .ok_or_else(|| {
                AppError::validation("Name must not be empty").with_detail("field", "name")
            })?
            .to_string();
    }
    if let Some(address) = patch.address {
        station.address = non_blank(Some(address.as_str()))
            .ok_or_else(|| {
                AppError::validation("Address must not be empty").with_detail("field", "address")
            })?
            .to_string();
    }
    if let Some(price) = patch.diesel_price {
        station.diesel_price = check_price(price, "dieselPrice")?;
    }
    if let Some(price) = patch.petrol_price {
        station.petrol_price = check_price(price, "petrolPrice")?;
    }
    if let Some(status) = patch.status {
        station.status = Some(parse_status(&status)?);
    }
    station.updated_at = now_millis();

    if !stations::update(pool, &station).await? {
        return Err(AppError::new(ErrorCode::StationNotFound).into());
    }
    tracing::info!(station_id = station.id, "Station updated");
    Ok(station)
}

/// Hard delete. Orders placed at the station stay in place.
pub async fn delete(pool: &SqlitePool, caller: &CurrentUser, station_id: i64) -> ServiceResult<()> {
    owned_station(pool, caller, station_id).await?;
    if !stations::delete(pool, station_id).await? {
        return Err(AppError::new(ErrorCode::StationNotFound).into());
    }
    tracing::info!(station_id, seller_id = caller.user_id, "Station removed");
    Ok(())
}

/// The caller's stations, newest first, with pending order counts
pub async fn list_for_seller(
    pool: &SqlitePool,
    caller: &CurrentUser,
) -> ServiceResult<Vec<SellerStation>> {
    caller.require_seller()?;
    Ok(stations::list_for_seller(pool, caller.user_id).await?)
}

/// Active stations within `radius_km` of the point, nearest first.
/// A seller also sees the pending order count on their own stations.
pub async fn find_nearby(
    pool: &SqlitePool,
    caller: &CurrentUser,
    longitude: f64,
    latitude: f64,
    radius_km: f64,
) -> ServiceResult<Vec<NearbyStation>> {
    GeoPoint::new(longitude, latitude)
        .map_err(|e| AppError::with_message(ErrorCode::ValueOutOfRange, e.to_string()))?;
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "Distance must be a positive number",
        )
        .with_detail("field", "dist")
        .into());
    }

    let bbox = BoundingBox::around(longitude, latitude, radius_km);
    let candidates = stations::find_active_in_box(pool, &bbox).await?;

    let mut nearby: Vec<NearbyStation> = candidates
        .into_iter()
        .filter(Station::is_active)
        .filter_map(|station| {
            let distance = haversine_km(
                longitude,
                latitude,
                station.location.longitude,
                station.location.latitude,
            );
            (distance <= radius_km).then_some(NearbyStation {
                station,
                distance,
                pending_orders_count: None,
            })
        })
        .collect();

    if caller.is_seller() && nearby.iter().any(|n| n.station.seller_id == caller.user_id) {
        let pending: HashMap<i64, i64> =
            orders::pending_counts_for_seller(pool, caller.user_id)
                .await?
                .into_iter()
                .collect();
        for entry in nearby
            .iter_mut()
            .filter(|n| n.station.seller_id == caller.user_id)
        {
            entry.pending_orders_count =
                Some(pending.get(&entry.station.id).copied().unwrap_or(0));
        }
    }

    // Stable sort keeps id order for equal distances
    nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    Ok(nearby)
}
