//! Order queries

use shared::models::{
    CustomerContact, CustomerOrder, Order, OrderStatus, StationOrder, StationSnapshot,
};
use sqlx::SqlitePool;

const ORDER_COLUMNS: &str = "id, customer_id, station_id, seller_id, fuel_type, quantity, \
     total_price, status, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Order>, sqlx::Error> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?");
    sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &SqlitePool, order: &Order) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO orders (id, customer_id, station_id, seller_id, fuel_type, quantity, \
         total_price, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.id)
    .bind(order.customer_id)
    .bind(order.station_id)
    .bind(order.seller_id)
    .bind(order.fuel_type)
    .bind(order.quantity)
    .bind(order.total_price)
    .bind(order.status)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Move an order from `from` to `to`. Returns false if the order is no longer
/// in `from` (a concurrent update won).
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
    updated_at: i64,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
            .bind(to)
            .bind(updated_at)
            .bind(id)
            .bind(from)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

#[derive(sqlx::FromRow)]
struct CustomerOrderRow {
    #[sqlx(flatten)]
    order: Order,
    station_name: Option<String>,
    station_address: Option<String>,
    station_diesel_price: Option<f64>,
    station_petrol_price: Option<f64>,
}

impl From<CustomerOrderRow> for CustomerOrder {
    fn from(row: CustomerOrderRow) -> Self {
        let station = match (
            row.station_name,
            row.station_address,
            row.station_diesel_price,
            row.station_petrol_price,
        ) {
            (Some(name), Some(address), Some(diesel_price), Some(petrol_price)) => {
                Some(StationSnapshot {
                    name,
                    address,
                    diesel_price,
                    petrol_price,
                })
            }
            _ => None,
        };
        CustomerOrder {
            order: row.order,
            station,
        }
    }
}

/// Customer's orders, newest first, with the station snapshot when it still exists
pub async fn list_for_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> Result<Vec<CustomerOrder>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CustomerOrderRow>(
        "SELECT o.id, o.customer_id, o.station_id, o.seller_id, o.fuel_type, o.quantity, \
         o.total_price, o.status, o.created_at, o.updated_at, \
         s.name AS station_name, s.address AS station_address, \
         s.diesel_price AS station_diesel_price, s.petrol_price AS station_petrol_price \
         FROM orders o LEFT JOIN stations s ON s.id = o.station_id \
         WHERE o.customer_id = ? ORDER BY o.created_at DESC, o.id DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(CustomerOrder::from).collect())
}

#[derive(sqlx::FromRow)]
struct StationOrderRow {
    #[sqlx(flatten)]
    order: Order,
    customer_name: Option<String>,
    customer_email: Option<String>,
    customer_phone: Option<String>,
}

impl From<StationOrderRow> for StationOrder {
    fn from(row: StationOrderRow) -> Self {
        let customer = match (row.customer_name, row.customer_email) {
            (Some(name), Some(email)) => Some(CustomerContact {
                name,
                email,
                phone: row.customer_phone.unwrap_or_default(),
            }),
            _ => None,
        };
        StationOrder {
            order: row.order,
            customer,
        }
    }
}

/// Orders placed at a station, newest first, with customer contact details
pub async fn list_for_station(
    pool: &SqlitePool,
    station_id: i64,
) -> Result<Vec<StationOrder>, sqlx::Error> {
    let rows = sqlx::query_as::<_, StationOrderRow>(
        "SELECT o.id, o.customer_id, o.station_id, o.seller_id, o.fuel_type, o.quantity, \
         o.total_price, o.status, o.created_at, o.updated_at, \
         u.name AS customer_name, u.email AS customer_email, u.phone AS customer_phone \
         FROM orders o LEFT JOIN users u ON u.id = o.customer_id \
         WHERE o.station_id = ? ORDER BY o.created_at DESC, o.id DESC",
    )
    .bind(station_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(StationOrder::from).collect())
}

/// Pending order count per station for one seller. Stations without
/// pending orders are absent.
pub async fn pending_counts_for_seller(
    pool: &SqlitePool,
    seller_id: i64,
) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    sqlx::query_as::<_, (i64, i64)>(
        "SELECT station_id, COUNT(*) FROM orders \
         WHERE seller_id = ? AND status = 'pending' GROUP BY station_id",
    )
    .bind(seller_id)
    .fetch_all(pool)
    .await
}

/// Completed-order totals for one station
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EarningsGroup {
    pub station_id: i64,
    pub earnings: f64,
    pub orders_count: i64,
}

/// Seller's completed orders grouped by station
pub async fn completed_totals_by_station(
    pool: &SqlitePool,
    seller_id: i64,
) -> Result<Vec<EarningsGroup>, sqlx::Error> {
    sqlx::query_as::<_, EarningsGroup>(
        "SELECT station_id, COALESCE(SUM(total_price), 0.0) AS earnings, COUNT(*) AS orders_count \
         FROM orders WHERE seller_id = ? AND status = 'completed' \
         GROUP BY station_id ORDER BY station_id",
    )
    .bind(seller_id)
    .fetch_all(pool)
    .await
}
