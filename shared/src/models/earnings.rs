//! Seller earnings report

use serde::{Deserialize, Serialize};

/// Completed-order revenue for one station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StationEarnings {
    pub station_id: i64,
    /// None when the station no longer exists
    pub station_name: Option<String>,
    pub earnings: f64,
    pub orders_count: i64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EarningsReport {
    pub total_earnings: f64,
    pub total_orders: i64,
    pub station_breakdown: Vec<StationEarnings>,
}
