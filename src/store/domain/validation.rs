//! Validation rules shared by inbound record payloads.

use thiserror::Error;

/// Errors returned when an inbound record fails validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A required text field is empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// The offending field, in wire (camelCase) spelling.
        field: &'static str,
    },

    /// A field that must hold a decimal number holds something else.
    #[error("{field} must be a decimal number, got '{value}'")]
    InvalidDecimal {
        /// The offending field, in wire (camelCase) spelling.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A numeric field is outside its permitted range.
    #[error("{field} is out of range: {reason}")]
    OutOfRange {
        /// The offending field, in wire (camelCase) spelling.
        field: &'static str,
        /// Description of the permitted range.
        reason: String,
    },
}

/// Result type for record validation.
pub type ValidationResult = Result<(), RecordValidationError>;

/// Rejects empty or whitespace-only text.
///
/// # Errors
///
/// Returns [`RecordValidationError::EmptyField`] when `value` is blank.
pub fn require_text(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(RecordValidationError::EmptyField { field });
    }
    Ok(())
}

/// Rejects text that does not parse as a decimal number.
///
/// # Errors
///
/// Returns [`RecordValidationError::InvalidDecimal`] when `value` is not a
/// finite decimal (an optional trailing `%` is accepted).
pub fn require_decimal(field: &'static str, value: &str) -> ValidationResult {
    if parse_decimal(value).is_none() {
        return Err(RecordValidationError::InvalidDecimal {
            field,
            value: value.to_owned(),
        });
    }
    Ok(())
}

/// Parses a decimal string such as `"150"`, `"42.5"`, or `"150%"`.
///
/// Returns `None` for empty, non-numeric, or non-finite input.
///
/// # Examples
///
/// ```
/// use pulseboard::store::domain::parse_decimal;
///
/// assert_eq!(parse_decimal("150%"), Some(150.0));
/// assert_eq!(parse_decimal("n/a"), None);
/// ```
#[must_use]
pub fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}
