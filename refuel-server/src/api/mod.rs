//! HTTP API routes

mod auth;
mod extract;
mod health;
mod order;
mod seller;
mod station;
mod utility;

use axum::routing::{get, patch, post, put};
use axum::{Router, middleware};
use shared::error::{AppError, ErrorCode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::user_auth_middleware;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    // No token required
    let public = Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/utility/geocode", get(utility::reverse_geocode));

    // Token required
    let protected = Router::new()
        .route(
            "/api/auth/profile",
            get(auth::get_profile).put(auth::update_profile),
        )
        .route("/api/auth/update-password", put(auth::update_password))
        .route("/api/stations", post(station::create_station))
        .route("/api/stations/nearby", get(station::nearby_stations))
        .route("/api/stations/seller", get(station::seller_stations))
        .route(
            "/api/stations/{id}",
            patch(station::update_station).delete(station::delete_station),
        )
        .route(
            "/api/orders",
            post(order::create_order).get(order::my_orders),
        )
        .route("/api/orders/station/{station_id}", get(order::station_orders))
        .route("/api/orders/{id}/status", patch(order::update_order_status))
        .route("/api/orders/{id}/cancel", patch(order::cancel_order))
        .route("/api/seller/earnings", get(seller::earnings_report))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            user_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(protected)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::with_message(ErrorCode::NotFound, "Route not found")
}
