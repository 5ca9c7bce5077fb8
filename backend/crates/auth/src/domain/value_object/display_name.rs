//! Display Name Value Object

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};

/// Maximum display name length (`users.name` column width)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

/// Human readable account name; not unique and not used for login
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl AsRef<str>) -> AppResult<Self> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(AppError::bad_request("Name cannot be empty"));
        }

        if name.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request("Name contains invalid characters"));
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(DisplayName::new("  Alice  ").unwrap().as_str(), "Alice");
        assert!(DisplayName::new("山田 太郎").is_ok());
        assert!(DisplayName::new("").is_err());
        assert!(DisplayName::new("bad\nname").is_err());
        assert!(DisplayName::new("x".repeat(DISPLAY_NAME_MAX_LENGTH + 1)).is_err());
    }
}
