//! Station queries

use shared::models::{SellerStation, Station};
use sqlx::SqlitePool;

use crate::geo::BoundingBox;

const STATION_COLUMNS: &str = "id, seller_id, name, address, longitude, latitude, \
     diesel_price, petrol_price, status, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Station>, sqlx::Error> {
    let sql = format!("SELECT {STATION_COLUMNS} FROM stations WHERE id = ?");
    sqlx::query_as::<_, Station>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &SqlitePool, station: &Station) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO stations (id, seller_id, name, address, longitude, latitude, \
         diesel_price, petrol_price, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(station.id)
    .bind(station.seller_id)
    .bind(&station.name)
    .bind(&station.address)
    .bind(station.location.longitude)
    .bind(station.location.latitude)
    .bind(station.diesel_price)
    .bind(station.petrol_price)
    .bind(station.status)
    .bind(station.created_at)
    .bind(station.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Write back the mutable fields. `seller_id` and the location are never touched.
/// Returns false when the station no longer exists.
pub async fn update(pool: &SqlitePool, station: &Station) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE stations SET name = ?, address = ?, diesel_price = ?, petrol_price = ?, \
         status = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&station.name)
    .bind(&station.address)
    .bind(station.diesel_price)
    .bind(station.petrol_price)
    .bind(station.status)
    .bind(station.updated_at)
    .bind(station.id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Hard delete. Returns false when nothing was deleted.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM stations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Seller's stations, newest first, with their live pending order count
pub async fn list_for_seller(
    pool: &SqlitePool,
    seller_id: i64,
) -> Result<Vec<SellerStation>, sqlx::Error> {
    sqlx::query_as::<_, SellerStation>(
        "SELECT s.id, s.seller_id, s.name, s.address, s.longitude, s.latitude, \
         s.diesel_price, s.petrol_price, s.status, s.created_at, s.updated_at, \
         (SELECT COUNT(*) FROM orders o WHERE o.station_id = s.id AND o.status = 'pending') \
         AS pending_orders_count \
         FROM stations s WHERE s.seller_id = ? ORDER BY s.created_at DESC, s.id DESC",
    )
    .bind(seller_id)
    .fetch_all(pool)
    .await
}

/// Ids and names of every station a seller owns
pub async fn names_for_seller(
    pool: &SqlitePool,
    seller_id: i64,
) -> Result<Vec<(i64, String)>, sqlx::Error> {
    sqlx::query_as::<_, (i64, String)>(
        "SELECT id, name FROM stations WHERE seller_id = ? ORDER BY created_at, id",
    )
    .bind(seller_id)
    .fetch_all(pool)
    .await
}

/// Active (or unset status) stations inside the box. Uses the (latitude, longitude) index.
pub async fn find_active_in_box(
    pool: &SqlitePool,
    bbox: &BoundingBox,
) -> Result<Vec<Station>, sqlx::Error> {
    let sql = format!(
        "SELECT {STATION_COLUMNS} FROM stations \
         WHERE latitude BETWEEN ? AND ? AND longitude BETWEEN ? AND ? \
         AND (status IS NULL OR status = 'active') ORDER BY id"
    );
    sqlx::query_as::<_, Station>(&sql)
        .bind(bbox.min_lat)
        .bind(bbox.max_lat)
        .bind(bbox.min_lng)
        .bind(bbox.max_lng)
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use shared::models::GeoPoint;

    fn sample(id: i64) -> Station {
        Station {
            id,
            seller_id: 1,
            name: "Depot".into(),
            address: "1 Main St".into(),
            location: GeoPoint::new(77.6, 12.9).unwrap(),
            diesel_price: 90.0,
            petrol_price: 100.0,
            status: None,
            created_at: 1,
            updated_at: 1,
        }
    }

    #[tokio::test]
    async fn test_update_reports_missing_row() {
        let pool = test_pool().await;
        let mut station = sample(10);
        assert!(!update(&pool, &station).await.unwrap());

        insert(&pool, &station).await.unwrap();
        station.diesel_price = 95.0;
        assert!(update(&pool, &station).await.unwrap());
        assert_eq!(find_by_id(&pool, 10).await.unwrap().unwrap().diesel_price, 95.0);

        assert!(delete(&pool, 10).await.unwrap());
        assert!(!update(&pool, &station).await.unwrap());
    }
}
