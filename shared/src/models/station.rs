//! Station Model

use serde::{Deserialize, Serialize};

use super::order::FuelType;

/// Operating status. A station whose status was never set counts as active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum StationStatus {
    Active,
    Inactive,
}

impl StationStatus {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// GeoJSON Point as it appears on the wire: `{"type": "Point", "coordinates": [lng, lat]}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoJsonPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

/// Validated WGS84 position, stored as two columns
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

/// Reasons a GeoJSON value is not an acceptable station location
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoPointError {
    #[error("Location type must be Point")]
    NotAPoint,
    #[error("Location coordinates must be [longitude, latitude]")]
    BadCoordinates,
    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange,
    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, GeoPointError> {
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoPointError::LongitudeOutOfRange);
        }
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoPointError::LatitudeOutOfRange);
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }
}

impl TryFrom<GeoJsonPoint> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(point: GeoJsonPoint) -> Result<Self, Self::Error> {
        if point.kind != "Point" {
            return Err(GeoPointError::NotAPoint);
        }
        match point.coordinates.as_slice() {
            [lng, lat] => GeoPoint::new(*lng, *lat),
            _ => Err(GeoPointError::BadCoordinates),
        }
    }
}

impl From<GeoPoint> for GeoJsonPoint {
    fn from(point: GeoPoint) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: vec![point.longitude, point.latitude],
        }
    }
}

impl Serialize for GeoPoint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GeoJsonPoint::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let point = GeoJsonPoint::deserialize(deserializer)?;
        GeoPoint::try_from(point).map_err(serde::de::Error::custom)
    }
}

/// Station entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: i64,
    pub seller_id: i64,
    pub name: String,
    pub address: String,
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub location: GeoPoint,
    pub diesel_price: f64,
    pub petrol_price: f64,
    pub status: Option<StationStatus>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Station {
    /// Unset status counts as active
    pub fn is_active(&self) -> bool {
        !matches!(self.status, Some(StationStatus::Inactive))
    }

    pub fn price_for(&self, fuel_type: FuelType) -> f64 {
        match fuel_type {
            FuelType::Diesel => self.diesel_price,
            FuelType::Petrol => self.petrol_price,
        }
    }
}

/// Create station payload. Every field is required; they are optional
/// here so that a missing field yields a validation error, not a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationCreate {
    #[serde(alias = "stationName")]
    pub name: Option<String>,
    pub address: Option<String>,
    pub location: Option<GeoJsonPoint>,
    pub diesel_price: Option<f64>,
    pub petrol_price: Option<f64>,
}

/// Partial station update; omitted fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationUpdate {
    #[serde(alias = "stationName")]
    pub name: Option<String>,
    pub address: Option<String>,
    pub diesel_price: Option<f64>,
    pub petrol_price: Option<f64>,
    pub status: Option<String>,
}

/// Station annotated with its distance from the query point (km).
/// `pending_orders_count` is only set on stations the searching seller owns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStation {
    #[serde(flatten)]
    pub station: Station,
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_orders_count: Option<i64>,
}

/// Station annotated with its live pending order count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SellerStation {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub station: Station,
    pub pending_orders_count: i64,
}
