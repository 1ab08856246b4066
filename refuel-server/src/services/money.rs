//! Money calculation utilities using rust_decimal for precision
//!
//! Prices and totals are stored as `f64`; every calculation goes through
//! `Decimal` and is rounded half-up to 2 decimal places. Inputs are bounded
//! so a valid price times a valid quantity always fits in a `Decimal`.

use rust_decimal::prelude::*;
use shared::error::{AppError, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed fuel price per litre
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per order (litres)
pub const MAX_QUANTITY: f64 = 100_000.0;

fn out_of_range() -> AppError {
    AppError::with_message(ErrorCode::ValueOutOfRange, "Amount is out of range")
}

/// Convert f64 to Decimal for calculation. `None` for NaN, infinities and
/// values beyond the `Decimal` range.
#[inline]
pub fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round an f64 amount to cents. Values `Decimal` cannot hold come back as-is.
#[inline]
pub fn round_money(value: f64) -> f64 {
    to_decimal(value).map(to_f64).unwrap_or(value)
}

/// `unit_price × quantity`, rounded to cents
pub fn line_total(unit_price: f64, quantity: f64) -> Result<f64, AppError> {
    let price = to_decimal(unit_price).ok_or_else(out_of_range)?;
    let quantity = to_decimal(quantity).ok_or_else(out_of_range)?;
    price
        .checked_mul(quantity)
        .map(to_f64)
        .ok_or_else(out_of_range)
}

/// Sum of amounts, rounded to cents
pub fn sum<I: IntoIterator<Item = f64>>(amounts: I) -> Result<f64, AppError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| {
            let amount = to_decimal(amount).ok_or_else(out_of_range)?;
            acc.checked_add(amount).ok_or_else(out_of_range)
        })
        .map(to_f64)
}

/// Finite, not negative, at most [`MAX_PRICE`]
pub fn is_valid_price(value: f64) -> bool {
    value.is_finite() && (0.0..=MAX_PRICE).contains(&value)
}

/// Finite, strictly positive, at most [`MAX_QUANTITY`]
pub fn is_valid_quantity(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value <= MAX_QUANTITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(90.0, 10.0).unwrap(), 900.0);
        // 0.1 * 3 is 0.30000000000000004 in f64
        assert_eq!(line_total(0.1, 3.0).unwrap(), 0.3);
        assert_eq!(line_total(101.5, 2.5).unwrap(), 253.75);
        assert_eq!(
            line_total(MAX_PRICE, MAX_QUANTITY).unwrap(),
            100_000_000_000.0
        );
    }

    #[test]
    fn test_line_total_out_of_range() {
        // Not representable as a Decimal at all
        let err = line_total(90.0, 1e29).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        let err = line_total(f64::NAN, 1.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        // Both factors fit but the product does not
        let err = line_total(1e20, 1e10).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(round_money(0.005), 0.01);
        assert_eq!(round_money(0.004), 0.0);
        assert!(round_money(f64::INFINITY).is_infinite());
    }

    #[test]
    fn test_sum_precision() {
        assert_eq!(sum(std::iter::repeat_n(0.01, 1000)).unwrap(), 10.0);
        assert_eq!(sum([0.1, 0.2]).unwrap(), 0.3);
        assert_eq!(sum(std::iter::empty()).unwrap(), 0.0);
    }

    #[test]
    fn test_sum_overflow() {
        let err = sum([5e28, 5e28]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        let err = sum([1.0, f64::INFINITY]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_validity() {
        assert!(is_valid_price(0.0));
        assert!(is_valid_price(MAX_PRICE));
        assert!(!is_valid_price(MAX_PRICE + 0.01));
        assert!(!is_valid_price(1e20));
        assert!(!is_valid_price(-0.01));
        assert!(!is_valid_price(f64::NAN));
        assert!(!is_valid_price(f64::INFINITY));

        assert!(is_valid_quantity(0.5));
        assert!(is_valid_quantity(MAX_QUANTITY));
        assert!(!is_valid_quantity(MAX_QUANTITY + 1.0));
        assert!(!is_valid_quantity(1e29));
        assert!(!is_valid_quantity(0.0));
        assert!(!is_valid_quantity(f64::NAN));
    }
}
