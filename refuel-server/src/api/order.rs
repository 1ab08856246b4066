//! Order endpoints

use axum::{Json, extract::State, http::StatusCode};
use shared::error::AppError;
use shared::models::{CustomerOrder, Order, OrderCreate, OrderStatusUpdate, StationOrder};

use super::ApiResult;
use super::extract::{ApiJson, ApiPath};
use crate::auth::CurrentUser;
use crate::services::orders;
use crate::state::AppState;

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(req): ApiJson<OrderCreate>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = orders::create(&state.pool, &caller, req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders
pub async fn my_orders(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> ApiResult<Vec<CustomerOrder>> {
    Ok(Json(orders::list_for_customer(&state.pool, &caller).await?))
}

/// GET /api/orders/station/{station_id}
pub async fn station_orders(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(station_id): ApiPath<i64>,
) -> ApiResult<Vec<StationOrder>> {
    Ok(Json(
        orders::list_for_station(&state.pool, &caller, station_id).await?,
    ))
}

/// PATCH /api/orders/{id}/status
pub async fn update_order_status(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(order_id): ApiPath<i64>,
    ApiJson(req): ApiJson<OrderStatusUpdate>,
) -> ApiResult<Order> {
    Ok(Json(
        orders::update_status(&state.pool, &caller, order_id, req).await?,
    ))
}

/// PATCH /api/orders/{id}/cancel
pub async fn cancel_order(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(order_id): ApiPath<i64>,
) -> ApiResult<Order> {
    Ok(Json(orders::cancel(&state.pool, &caller, order_id).await?))
}
