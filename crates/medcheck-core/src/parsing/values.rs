use crate::error::{Field, FieldError};
use crate::model::DATE_FORMAT;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a decimal field value.
///
/// Handles formats like:
/// - "95" -> 95
/// - "0.95" -> 0.95
/// - "0,95" -> 0.95 (decimal comma)
/// - "9.5e1" -> 95
///
/// Digit grouping is refused rather than guessed: "1,000", "1,000.5" and
/// "1,000,000" are not numbers.
pub fn parse_decimal(field: Field, s: &str) -> Result<Decimal, FieldError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(FieldError::Missing { field });
    }

    let not_a_number = || FieldError::NotANumber {
        field,
        value: s.to_string(),
    };

    let normalized = match s.split_once(',') {
        None => s.to_string(),
        Some((whole, fraction)) => {
            if fraction.contains(',') || s.contains('.') || is_digit_group(whole, fraction) {
                return Err(not_a_number());
            }
            format!("{whole}.{fraction}")
        }
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| not_a_number())
}

/// "1,000" reads as one thousand in en-US and as 1.000 elsewhere. A leading
/// zero ("0,030") is never a group.
fn is_digit_group(whole: &str, fraction: &str) -> bool {
    let digits = whole.trim_start_matches(['-', '+']);
    fraction.len() == 3
        && fraction.bytes().all(|b| b.is_ascii_digit())
        && !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && !digits.trim_start_matches('0').is_empty()
}

/// Parse an ISO `YYYY-MM-DD` date field value.
pub fn parse_date(field: Field, s: &str) -> Result<NaiveDate, FieldError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(FieldError::Missing { field });
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| FieldError::NotADate {
        field,
        value: s.to_string(),
    })
}

/// Require a non-blank text field, returning it trimmed.
pub fn required_text(field: Field, s: &str) -> Result<String, FieldError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(FieldError::Missing { field });
    }
    Ok(s.to_string())
}
