//! Helpers shared by the request and response DTOs.

use bigdecimal::{BigDecimal, Zero};
use jiff_diesel::DateTime;
use validator::ValidationError;

/// Timestamps leave the API as ISO 8601 civil date-times.
pub fn format_timestamp(value: DateTime) -> String {
    value.to_jiff().to_string()
}

/// Largest magnitude a `NUMERIC(12,2)` column holds, exclusive.
const MONEY_LIMIT: i64 = 10_000_000_000;

/// Money fits `NUMERIC(12,2)`: non-negative, below 10^10, at most two
/// decimal places.
pub fn validate_money(value: &BigDecimal) -> Result<(), ValidationError> {
    if value < &BigDecimal::zero() {
        return Err(ValidationError::new("money").with_message("must not be negative".into()));
    }
    if value >= &BigDecimal::from(MONEY_LIMIT) {
        return Err(ValidationError::new("money")
            .with_message("must be less than 10000000000".into()));
    }
    let (_, scale) = value.normalized().as_bigint_and_exponent();
    if scale > 2 {
        return Err(ValidationError::new("money")
            .with_message("must have at most 2 decimal places".into()));
    }
    Ok(())
}

/// Length check on the value as it will be stored, i.e. trimmed.
fn trimmed_length(
    value: &str,
    min: usize,
    max: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(ValidationError::new("length").with_message(message.into()));
    }
    Ok(())
}

pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    trimmed_length(value, 3, 30, "Username must be between 3 and 30 characters")
}

pub fn validate_title(value: &str) -> Result<(), ValidationError> {
    trimmed_length(value, 1, 200, "Title must be between 1 and 200 characters")
}

pub fn validate_product_name(value: &str) -> Result<(), ValidationError> {
    trimmed_length(value, 1, 200, "Name must be between 1 and 200 characters")
}

pub fn validate_group_name(value: &str) -> Result<(), ValidationError> {
    trimmed_length(value, 1, 100, "Name must be between 1 and 100 characters")
}

pub fn validate_description(value: &str) -> Result<(), ValidationError> {
    trimmed_length(value, 1, 10_000, "Description is required")
}

/// Turns an optional text field from a partial update into a changeset
/// value: absent leaves the column alone, blank clears it.
pub fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Blank optional text becomes `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    clearable(value).flatten()
}
