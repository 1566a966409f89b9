//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., phone number)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Number is outside the accepted range
    OutOfRange { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::OutOfRange { field, reason } => {
                write!(f, "{} {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum length of any text column (VARCHAR(255)).
pub(crate) const MAX_TEXT_LEN: usize = 255;

/// Check a free-text field against the column limit, optionally rejecting blanks.
///
/// Returns the trimmed value.
pub(crate) fn text_field(
    field: &'static str,
    value: &str,
    required: bool,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if required && trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }

    Ok(trimmed.to_owned())
}

/// Reject non-positive identifiers.
pub(crate) fn positive_id(field: &'static str, id: i64) -> Result<i64, ValidationError> {
    if id <= 0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: "must be a positive integer",
        });
    }
    Ok(id)
}
