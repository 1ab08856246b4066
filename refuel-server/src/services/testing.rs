//! Fixtures shared by service and API tests

use shared::models::{GeoJsonPoint, Station, StationCreate, User, UserRole};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::users;

/// Insert a user directly (no password hashing) and return it as a caller
pub async fn user(pool: &SqlitePool, name: &str, role: UserRole) -> CurrentUser {
    let user = User {
        id: snowflake_id(),
        name: name.to_string(),
        email: format!("{}-{}@test.io", name.to_lowercase(), snowflake_id()),
        hashed_password: "unused".into(),
        role,
        phone: "555-0100".into(),
        profile_picture: String::new(),
        created_at: now_millis(),
    };
    users::insert(pool, &user).await.unwrap();
    CurrentUser {
        user_id: user.id,
        email: user.email,
        role,
    }
}

pub async fn seller(pool: &SqlitePool, name: &str) -> CurrentUser {
    user(pool, name, UserRole::Seller).await
}

pub async fn customer(pool: &SqlitePool, name: &str) -> CurrentUser {
    user(pool, name, UserRole::Customer).await
}

pub fn station_payload(name: &str, lng: f64, lat: f64, diesel: f64, petrol: f64) -> StationCreate {
    StationCreate {
        name: Some(name.to_string()),
        address: Some(format!("{name} Road")),
        location: Some(GeoJsonPoint {
            kind: "Point".into(),
            coordinates: vec![lng, lat],
        }),
        diesel_price: Some(diesel),
        petrol_price: Some(petrol),
    }
}

/// Create a station through the registry
pub async fn station(
    pool: &SqlitePool,
    owner: &CurrentUser,
    name: &str,
    lng: f64,
    lat: f64,
) -> Station {
    super::stations::create(pool, owner, station_payload(name, lng, lat, 90.0, 100.0))
        .await
        .unwrap()
}
