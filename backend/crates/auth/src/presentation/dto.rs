//! API DTOs (Data Transfer Objects)
//!
//! Request bodies default every field to empty so that a missing field is
//! reported through [`Validate`] together with every other failing field.

use chrono::SecondsFormat;
use kernel::error::app_error::AppError;
use kernel::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::application::{ChangePasswordInput, SignInInput, SignUpInput, TokenPair};
use crate::domain::entity::user::User;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, phone::Phone, user_password::RawPassword,
};

/// Field-level message of a value object error
fn reason(err: AppError) -> String {
    err.message().to_string()
}

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Validate for RegisterRequest {
    type Output = SignUpInput;

    fn validate(self) -> Result<SignUpInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = errors
            .require("name", &self.name)
            .and_then(|v| errors.check("name", DisplayName::new(v).map_err(reason)));
        let email = errors
            .require("email", &self.email)
            .and_then(|v| errors.check("email", Email::new(v).map_err(reason)));
        let phone = errors
            .require("phone", &self.phone)
            .and_then(|v| errors.check("phone", Phone::new(v).map_err(reason)));
        let password = if self.password.is_empty() {
            errors.add("password", "password is required");
            None
        } else {
            errors.check("password", RawPassword::new(self.password).map_err(reason))
        };

        match (name, email, phone, password) {
            (Some(name), Some(email), Some(phone), Some(password)) if errors.is_empty() => {
                Ok(SignUpInput {
                    name,
                    email,
                    phone,
                    password,
                })
            }
            _ => Err(errors),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Validate for LoginRequest {
    type Output = SignInInput;

    /// Presence only; format problems surface as invalid credentials
    fn validate(self) -> Result<SignInInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("phone", &self.phone);
        if self.password.is_empty() {
            errors.add("password", "password is required");
        }
        errors.into_result()?;

        Ok(SignInInput {
            phone: self.phone,
            password: self.password,
        })
    }
}

// ============================================================================
// Refresh
// ============================================================================

/// Refresh request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshRequest {
    #[serde(alias = "refresh_token")]
    pub refresh_token: String,
}

impl Validate for RefreshRequest {
    type Output = String;

    fn validate(self) -> Result<String, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let token = errors.require("refreshToken", &self.refresh_token).map(str::to_string);
        errors.into_result()?;
        Ok(token.unwrap_or_default())
    }
}

// ============================================================================
// Change Password
// ============================================================================

/// Change password request
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("current_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

impl Validate for ChangePasswordRequest {
    type Output = ChangePasswordInput;

    fn validate(self) -> Result<ChangePasswordInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.current_password.is_empty() {
            errors.add("currentPassword", "currentPassword is required");
        }
        let new_password = if self.new_password.is_empty() {
            errors.add("newPassword", "newPassword is required");
            None
        } else {
            errors.check("newPassword", RawPassword::new(self.new_password).map_err(reason))
        };

        match new_password {
            Some(new_password) if errors.is_empty() => Ok(ChangePasswordInput {
                current_password: self.current_password,
                new_password,
            }),
            _ => Err(errors),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Public view of a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.value(),
            name: user.name.to_string(),
            email: user.email.to_string(),
            phone: user.phone.to_string(),
            role: user.user_role.to_string(),
        }
    }
}

/// Issued credentials
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token expiry, RFC 3339
    pub expires_at: String,
    pub user: UserResponse,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            user: UserResponse::from(&pair.user),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_at: pair.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, phone: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_register_valid() {
        let input = register("Alice", "Alice@Example.com", "+1234567890", "password123")
            .validate()
            .unwrap();
        assert_eq!(input.email.as_str(), "alice@example.com");
        assert_eq!(input.phone.as_str(), "+1234567890");
    }

    #[test]
    fn test_register_collects_every_field() {
        let errors = register("", "not-an-email", "", "123").validate().unwrap_err();

        assert_eq!(errors.len(), 4);
        assert!(errors.has_field("name"));
        assert!(errors.has_field("email"));
        assert!(errors.has_field("phone"));
        assert!(errors.has_field("password"));
    }

    #[test]
    fn test_missing_fields_deserialize_as_blank() {
        let req: RegisterRequest = serde_json::from_str(r#"{"name":"Alice"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(!errors.has_field("name"));
    }

    #[test]
    fn test_login_requires_presence_only() {
        let input = LoginRequest {
            phone: "whatever".into(),
            password: "x".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(input.phone, "whatever");

        let errors = LoginRequest::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_refresh_request() {
        let req: RefreshRequest = serde_json::from_str(r#"{"refreshToken":" abc "}"#).unwrap();
        assert_eq!(req.validate().unwrap(), "abc");
        assert!(RefreshRequest::default().validate().unwrap_err().has_field("refreshToken"));
    }

    #[test]
    fn test_refresh_request_accepts_snake_case() {
        let req: RefreshRequest = serde_json::from_str(r#"{"refresh_token":"abc"}"#).unwrap();
        assert_eq!(req.validate().unwrap(), "abc");
    }

    #[test]
    fn test_debug_hides_passwords() {
        let req = register("Alice", "a@example.com", "+1234567890", "hunter2secret");
        let debug = format!("{:?}", req);
        assert!(debug.contains("a@example.com"));
        assert!(!debug.contains("hunter2secret"));

        let login = LoginRequest {
            phone: "+1234567890".into(),
            password: "hunter2secret".into(),
        };
        assert!(!format!("{:?}", login).contains("hunter2secret"));

        let change = ChangePasswordRequest {
            current_password: "hunter2secret".into(),
            new_password: "brand-new-secret".into(),
        };
        let debug = format!("{:?}", change);
        assert!(!debug.contains("hunter2secret"));
        assert!(!debug.contains("brand-new-secret"));
    }

    #[test]
    fn test_change_password_policy_applies_to_new_password_only() {
        let input = ChangePasswordRequest {
            current_password: "x".into(),
            new_password: "long-enough".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(input.current_password, "x");

        let errors = ChangePasswordRequest {
            current_password: "x".into(),
            new_password: "short".into(),
        }
        .validate()
        .unwrap_err();
        assert!(errors.has_field("newPassword"));
    }
}
