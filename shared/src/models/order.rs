//! Order Model

use serde::{Deserialize, Serialize};

/// Fuel product sold per litre
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum FuelType {
    Diesel,
    Petrol,
}

impl FuelType {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "diesel" => Some(Self::Diesel),
            "petrol" => Some(Self::Petrol),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Diesel => "diesel",
            Self::Petrol => "petrol",
        }
    }
}

/// Order lifecycle status
///
/// ```text
/// pending ──► accepted ──► completed
///    │
///    ├──────► rejected
///    └──────► cancelled
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Pending,
        Self::Accepted,
        Self::Rejected,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }

    /// Whether moving to `next` is allowed. Staying in the same status is
    /// always allowed so repeated updates are no-ops.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        *self == next
            || matches!(
                (self, next),
                (Pending, Accepted | Rejected | Cancelled) | (Accepted, Completed)
            )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_db())
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub station_id: i64,
    pub seller_id: i64,
    pub fuel_type: FuelType,
    pub quantity: f64,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Place order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub station_id: Option<i64>,
    pub fuel_type: Option<String>,
    pub quantity: Option<f64>,
}

/// Status update payload. Kept as a string so unknown values map to
/// `InvalidOrderStatus` instead of a body parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: Option<String>,
}

/// Station fields shown next to a customer's order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct StationSnapshot {
    pub name: String,
    pub address: String,
    pub diesel_price: f64,
    pub petrol_price: f64,
}

/// Order as listed to the customer who placed it.
/// `station` is null once the station has been deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerOrder {
    #[serde(flatten)]
    pub order: Order,
    pub station: Option<StationSnapshot>,
}

/// Customer contact shown to the station owner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CustomerContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Order as listed to the station owner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationOrder {
    #[serde(flatten)]
    pub order: Order,
    pub customer: Option<CustomerContact>,
}
