//! Order lifecycle: placement, listings and status transitions

use shared::error::{AppError, ErrorCode};
use shared::models::{
    CustomerOrder, FuelType, Order, OrderCreate, OrderStatus, OrderStatusUpdate, StationOrder,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use super::money;
use crate::auth::CurrentUser;
use crate::db::{orders, stations};
use crate::error::ServiceResult;

fn parse_fuel_type(value: &str) -> Result<FuelType, AppError> {
    FuelType::from_db(value.trim()).ok_or_else(|| {
        AppError::new(ErrorCode::InvalidFuelType)
            .with_detail("allowed", serde_json::json!(["diesel", "petrol"]))
    })
}

fn parse_status(value: Option<&str>) -> Result<OrderStatus, AppError> {
    value
        .map(str::trim)
        .and_then(OrderStatus::from_db)
        .ok_or_else(|| {
            let allowed: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_db()).collect();
            AppError::new(ErrorCode::InvalidOrderStatus).with_detail("allowed", allowed)
        })
}

async fn load_order(pool: &SqlitePool, order_id: i64) -> ServiceResult<Order> {
    Ok(orders::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?)
}

/// Move an order to `next`. Re-applying the current status returns the order unchanged.
async fn transition(pool: &SqlitePool, order: Order, next: OrderStatus) -> ServiceResult<Order> {
    if order.status == next {
        return Ok(order);
    }
    let rejected = |from: OrderStatus| {
        AppError::new(ErrorCode::OrderInvalidTransition)
            .with_detail("from", from.as_db())
            .with_detail("to", next.as_db())
    };
    if !order.status.can_transition_to(next) {
        return Err(rejected(order.status).into());
    }

    let now = now_millis();
    if !orders::update_status(pool, order.id, order.status, next, now).await? {
        // Lost a race with another update; report against the status that won
        let current = load_order(pool, order.id).await?;
        if current.status == next {
            return Ok(current);
        }
        return Err(rejected(current.status).into());
    }

    tracing::info!(
        order_id = order.id,
        seller_id = order.seller_id,
        from = order.status.as_db(),
        to = next.as_db(),
        "Order status changed"
    );
    Ok(Order {
        status: next,
        updated_at: now,
        ..order
    })
}

/// Place an order at the station's current price
pub async fn create(pool: &SqlitePool, caller: &CurrentUser, req: OrderCreate) -> ServiceResult<Order> {
    let station_id = req.station_id.ok_or_else(|| AppError::required("stationId"))?;
    let fuel_type = req
        .fuel_type
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .ok_or_else(|| AppError::required("fuelType"))?;
    let quantity = req.quantity.ok_or_else(|| AppError::required("quantity"))?;

    let fuel_type = parse_fuel_type(fuel_type)?;
    if !money::is_valid_quantity(quantity) {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!(
                "Quantity must be a positive number no greater than {}",
                money::MAX_QUANTITY
            ),
        )
        .with_detail("field", "quantity")
        .with_detail("max", money::MAX_QUANTITY)
        .into());
    }

    let station = stations::find_by_id(pool, station_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StationNotFound))?;

    let total_price = money::line_total(station.price_for(fuel_type), quantity)?;
    let now = now_millis();
    let order = Order {
        id: snowflake_id(),
        customer_id: caller.user_id,
        station_id: station.id,
        seller_id: station.seller_id,
        fuel_type,
        quantity,
        total_price,
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    };
    orders::insert(pool, &order).await?;

    tracing::info!(
        order_id = order.id,
        station_id = order.station_id,
        seller_id = order.seller_id,
        total_price = order.total_price,
        "Order placed"
    );
    Ok(order)
}

/// Caller's own orders, newest first
pub async fn list_for_customer(
    pool: &SqlitePool,
    caller: &CurrentUser,
) -> ServiceResult<Vec<CustomerOrder>> {
    Ok(orders::list_for_customer(pool, caller.user_id).await?)
}

/// Orders at a station the caller owns, newest first
pub async fn list_for_station(
    pool: &SqlitePool,
    caller: &CurrentUser,
    station_id: i64,
) -> ServiceResult<Vec<StationOrder>> {
    let station = stations::find_by_id(pool, station_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StationNotFound))?;
    if station.seller_id != caller.user_id {
        return Err(AppError::new(ErrorCode::NotStationOwner).into());
    }
    Ok(orders::list_for_station(pool, station_id).await?)
}

/// Seller-driven status change (accept, reject, complete)
pub async fn update_status(
    pool: &SqlitePool,
    caller: &CurrentUser,
    order_id: i64,
    req: OrderStatusUpdate,
) -> ServiceResult<Order> {
    let next = parse_status(req.status.as_deref())?;
    let order = load_order(pool, order_id).await?;
    if order.seller_id != caller.user_id {
        return Err(AppError::new(ErrorCode::NotOrderOwner).into());
    }
    transition(pool, order, next).await
}

/// Customer cancels their own pending order
pub async fn cancel(pool: &SqlitePool, caller: &CurrentUser, order_id: i64) -> ServiceResult<Order> {
    let order = load_order(pool, order_id).await?;
    if order.customer_id != caller.user_id {
        return Err(AppError::new(ErrorCode::NotOrderOwner).into());
    }
    transition(pool, order, OrderStatus::Cancelled).await
}
