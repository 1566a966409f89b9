//! Location input validation

use super::validation::{text_field, ValidationError};

/// Validated location fields, everything except the store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFields {
    pub number: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub image_url: String,
}

impl LocationFields {
    /// Validate raw location fields.
    ///
    /// # Rules
    /// - `country` and `city` must not be blank
    /// - every field is at most 255 characters (surrounding whitespace is trimmed)
    /// - `image_url`, when present, must be an http(s) URL
    pub fn new(
        number: &str,
        country: &str,
        city: &str,
        street: &str,
        image_url: &str,
    ) -> Result<Self, ValidationError> {
        let image_url = text_field("imageUrl", image_url, false)?;
        if !image_url.is_empty()
            && !(image_url.starts_with("http://") || image_url.starts_with("https://"))
        {
            return Err(ValidationError::InvalidFormat {
                field: "imageUrl",
                reason: "must be an http or https URL",
            });
        }

        Ok(Self {
            number: text_field("number", number, false)?,
            country: text_field("country", country, true)?,
            city: text_field("city", city, true)?,
            street: text_field("street", street, false)?,
            image_url,
        })
    }
}
