//! Unified error codes for the RefuelNow service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Station errors
//! - 4xxx: Order errors
//! - 5xxx: Upstream (third-party service) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for compact serialization
/// and easy consumption by the web frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// User referenced by the token no longer exists
    UserNotFound = 1005,
    /// Email is already registered
    EmailAlreadyRegistered = 1006,
    /// Password too short
    PasswordTooShort = 1007,

    // ==================== 2xxx: Permission ====================
    /// Seller role required
    SellerRequired = 2002,
    /// Caller does not own the station
    NotStationOwner = 2003,
    /// Caller is not a party to the order
    NotOrderOwner = 2004,

    // ==================== 3xxx: Station ====================
    /// Station not found
    StationNotFound = 3001,
    /// Location is not a valid [longitude, latitude] point
    InvalidLocation = 3002,
    /// Fuel price is negative or not a number
    InvalidPrice = 3003,
    /// Station status is not active/inactive
    InvalidStationStatus = 3004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Fuel type is not diesel/petrol
    InvalidFuelType = 4002,
    /// Quantity is not a positive number
    InvalidQuantity = 4003,
    /// Order status is not one of the defined values
    InvalidOrderStatus = 4004,
    /// Status change not allowed from the current status
    OrderInvalidTransition = 4005,

    // ==================== 5xxx: Upstream ====================
    /// Third-party service failed or returned garbage
    UpstreamError = 5001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Please provide all required fields",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "No token, authorization denied",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Token is not valid",
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailAlreadyRegistered => "User already exists",
            ErrorCode::PasswordTooShort => "Password is too short",

            // Permission
            ErrorCode::SellerRequired => "Only sellers can perform this action",
            ErrorCode::NotStationOwner => "Not authorized for this station",
            ErrorCode::NotOrderOwner => "Not authorized for this order",

            // Station
            ErrorCode::StationNotFound => "Station not found",
            ErrorCode::InvalidLocation => "Invalid location",
            ErrorCode::InvalidPrice => "Invalid fuel price",
            ErrorCode::InvalidStationStatus => "Invalid station status",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidFuelType => "Invalid fuel type",
            ErrorCode::InvalidQuantity => "Invalid quantity",
            ErrorCode::InvalidOrderStatus => "Invalid status",
            ErrorCode::OrderInvalidTransition => "Order status change not allowed",

            // Upstream
            ErrorCode::UpstreamError => "Failed to connect to upstream service",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::UserNotFound),
            1006 => Ok(ErrorCode::EmailAlreadyRegistered),
            1007 => Ok(ErrorCode::PasswordTooShort),

            // Permission
            2002 => Ok(ErrorCode::SellerRequired),
            2003 => Ok(ErrorCode::NotStationOwner),
            2004 => Ok(ErrorCode::NotOrderOwner),

            // Station
            3001 => Ok(ErrorCode::StationNotFound),
            3002 => Ok(ErrorCode::InvalidLocation),
            3003 => Ok(ErrorCode::InvalidPrice),
            3004 => Ok(ErrorCode::InvalidStationStatus),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::InvalidFuelType),
            4003 => Ok(ErrorCode::InvalidQuantity),
            4004 => Ok(ErrorCode::InvalidOrderStatus),
            4005 => Ok(ErrorCode::OrderInvalidTransition),

            // Upstream
            5001 => Ok(ErrorCode::UpstreamError),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
