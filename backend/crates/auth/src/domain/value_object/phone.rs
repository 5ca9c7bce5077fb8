//! Phone Number Value Object
//!
//! Phone numbers are the login identifier. Spaces and dashes are dropped so
//! that `+1 234-567-890` and `+1234567890` name the same account.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};

/// Maximum stored length including a leading `+` (`users.phone` column width)
pub const PHONE_MAX_LENGTH: usize = 15;

/// Minimum number of digits
const PHONE_MIN_DIGITS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = phone
            .as_ref()
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();

        if normalized.is_empty() {
            return Err(AppError::bad_request("Phone cannot be empty"));
        }

        let digits = normalized.strip_prefix('+').unwrap_or(&normalized);

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::bad_request(
                "Phone may only contain digits and a leading '+'",
            ));
        }

        if digits.len() < PHONE_MIN_DIGITS {
            return Err(AppError::bad_request(format!(
                "Phone must have at least {} digits",
                PHONE_MIN_DIGITS
            )));
        }

        if normalized.len() > PHONE_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Phone must be at most {} characters",
                PHONE_MAX_LENGTH
            )));
        }

        Ok(Self(normalized))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_valid() {
        assert_eq!(Phone::new("+1234567890").unwrap().as_str(), "+1234567890");
        assert_eq!(Phone::new("0312345678").unwrap().as_str(), "0312345678");
    }

    #[test]
    fn test_phone_separators_are_dropped() {
        let phone = Phone::new(" +1 234-567-890 ").unwrap();
        assert_eq!(phone, Phone::new("+1234567890").unwrap());
    }

    #[test]
    fn test_phone_invalid() {
        assert!(Phone::new("").is_err());
        assert!(Phone::new("+").is_err());
        assert!(Phone::new("12345").is_err());
        assert!(Phone::new("12+345678").is_err());
        assert!(Phone::new("phone-number").is_err());
        assert!(Phone::new("+1234567890123456").is_err());
    }
}
