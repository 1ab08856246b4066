//! Seller dashboard endpoints

use axum::{Json, extract::State};
use shared::models::EarningsReport;

use super::ApiResult;
use crate::auth::CurrentUser;
use crate::services::earnings;
use crate::state::AppState;

/// GET /api/seller/earnings
pub async fn earnings_report(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> ApiResult<EarningsReport> {
    Ok(Json(earnings::compute(&state.pool, &caller).await?))
}
