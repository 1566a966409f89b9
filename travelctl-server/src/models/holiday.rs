//! Holiday input validation and list filters

use chrono::NaiveDate;

use super::validation::{positive_id, text_field};
use super::{Price, ValidationError};

/// Wire date format for `startDate`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validated holiday fields, everything except the store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayFields {
    pub title: String,
    pub start_date: NaiveDate,
    /// Length of the holiday in days
    pub duration: i32,
    pub free_slots: i32,
    pub price: Price,
    /// `None` means the holiday has no location
    pub location_id: Option<i64>,
}

impl HolidayFields {
    /// Validate raw holiday fields.
    ///
    /// # Rules
    /// - `title` must not be blank, max 255 characters
    /// - `duration` is at least one day
    /// - `freeSlots` is not negative
    /// - `location`, when present, is a positive id
    pub fn new(
        title: &str,
        start_date: NaiveDate,
        duration: i32,
        free_slots: i32,
        price: Price,
        location_id: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let title = text_field("title", title, true)?;

        if duration < 1 {
            return Err(ValidationError::OutOfRange {
                field: "duration",
                reason: "must be at least 1",
            });
        }

        if free_slots < 0 {
            return Err(ValidationError::OutOfRange {
                field: "freeSlots",
                reason: "must not be negative",
            });
        }

        let location_id = location_id
            .map(|id| positive_id("location", id))
            .transpose()?;

        Ok(Self {
            title,
            start_date,
            duration,
            free_slots,
            price,
            location_id,
        })
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field,
            reason: "must be a date in YYYY-MM-DD format",
        }
    })
}

/// Equality filters for holiday listings.
///
/// Both filters are optional; when both are set a holiday must match both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HolidayFilter {
    pub start_date: Option<NaiveDate>,
    pub duration: Option<i32>,
}

impl HolidayFilter {
    /// Build a filter from raw query-string values.
    ///
    /// Empty values are treated as absent.
    pub fn parse(start_date: Option<&str>, duration: Option<&str>) -> Result<Self, ValidationError> {
        let start_date = start_date
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_date("startDate", s))
            .transpose()?;

        let duration = duration
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim().parse::<i32>().map_err(|_| ValidationError::InvalidFormat {
                    field: "duration",
                    reason: "must be an integer",
                })
            })
            .transpose()?;

        Ok(Self {
            start_date,
            duration,
        })
    }
}
