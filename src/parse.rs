//! Numeric input parsing shared by every front-end.
//!
//! Quantities are whole numbers. Prices accept both a period and a
//! comma as the decimal separator; the comma form is normalized to the
//! period form before parsing, so "2.50" and "2,50" are the same value.

use log::debug;

use crate::error::{StoreError, StoreResult};

/// Parses a quantity string into a non-negative integer.
pub fn parse_quantity(input: &str) -> StoreResult<i64> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| StoreError::InvalidInput(format!("'{}' is not a whole number", trimmed)))?;
    if value < 0 {
        return Err(StoreError::InvalidInput(
            "quantity must be zero or greater".to_string(),
        ));
    }
    Ok(value)
}

/// Parses a price string into a non-negative number.
pub fn parse_price(input: &str) -> StoreResult<f64> {
    let normalized = input.trim().replace(',', ".");
    let value: f64 = normalized.parse().map_err(|_| {
        debug!("Failed to parse price input '{}'", input.trim());
        StoreError::InvalidInput(format!("'{}' is not a number", input.trim()))
    })?;
    if !value.is_finite() {
        return Err(StoreError::InvalidInput(
            "price must be a finite number".to_string(),
        ));
    }
    if value < 0.0 {
        return Err(StoreError::InvalidInput(
            "price must be zero or greater".to_string(),
        ));
    }
    Ok(value)
}
