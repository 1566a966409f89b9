//! Reservation input validation
//!
//! Phone format: optional leading `+`, digits, spaces, dashes and
//! parentheses, starting with a digit or `(` and ending with a digit.

use once_cell::sync::Lazy;
use regex::Regex;

use super::validation::text_field;
use super::ValidationError;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9(][0-9 ()-]{4,18}[0-9]$").expect("invalid phone regex")
});

/// Validated phone number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a phone number, validating its format.
    ///
    /// # Example
    /// ```
    /// use travelctl_server::models::PhoneNumber;
    ///
    /// assert!(PhoneNumber::new("+359 88 123 4567").is_ok());
    /// assert!(PhoneNumber::new("call me").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty {
                field: "phoneNumber",
            });
        }

        if !PHONE_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "phoneNumber",
                reason: "must be 6-20 digits, optionally with +, spaces, dashes or parentheses",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated mutable reservation fields (the holiday reference is set once at creation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationFields {
    pub phone_number: PhoneNumber,
    pub contact_name: String,
}

impl ReservationFields {
    pub fn new(phone_number: &str, contact_name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            phone_number: PhoneNumber::new(phone_number)?,
            contact_name: text_field("contactName", contact_name, true)?,
        })
    }
}
