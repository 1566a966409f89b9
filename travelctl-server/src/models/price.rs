//! Holiday price
//!
//! Stored as `NUMERIC(10,2)`, so a price carries at most two decimal places
//! and eight integer digits.

use rust_decimal::Decimal;

use super::ValidationError;

/// Maximum number of decimal places
const MAX_SCALE: u32 = 2;

/// Exclusive upper bound that fits NUMERIC(10,2)
const PRICE_LIMIT: i64 = 100_000_000;

/// Validated, non-negative price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    /// Create a price, rejecting negatives, sub-cent precision and overflow.
    ///
    /// # Example
    /// ```
    /// use rust_decimal::Decimal;
    /// use travelctl_server::models::Price;
    ///
    /// assert!(Price::new(Decimal::new(14999, 2)).is_ok());   // 149.99
    /// assert!(Price::new(Decimal::new(-1, 0)).is_err());
    /// assert!(Price::new(Decimal::new(1001, 3)).is_err());   // 1.001
    /// ```
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::OutOfRange {
                field: "price",
                reason: "must not be negative",
            });
        }

        let value = value.normalize();
        if value.scale() > MAX_SCALE {
            return Err(ValidationError::InvalidFormat {
                field: "price",
                reason: "must have at most 2 decimal places",
            });
        }

        if value >= Decimal::from(PRICE_LIMIT) {
            return Err(ValidationError::OutOfRange {
                field: "price",
                reason: "must be below 100000000",
            });
        }

        let mut value = value;
        value.rescale(MAX_SCALE);
        Ok(Self(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}
