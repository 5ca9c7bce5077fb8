//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::ValidationErrors;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown phone or wrong password (deliberately indistinguishable)
    #[error("Invalid phone or password")]
    InvalidCredentials,

    /// Email or phone already registered
    #[error("User with this email or phone already exists")]
    DuplicateUser,

    /// Token failed signature, expiry or shape checks
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Current password did not match on password change
    #[error("Current password is incorrect")]
    WrongPassword,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Missing or malformed `Authorization` header
    #[error("{0}")]
    MissingCredentials(&'static str),

    /// Authenticated, but the role does not admit the request
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// Request body failed validation
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::MissingCredentials(_) => ErrorKind::Unauthorized,
            AuthError::DuplicateUser => ErrorKind::Conflict,
            AuthError::WrongPassword => ErrorKind::BadRequest,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InsufficientPermissions => ErrorKind::Forbidden,
            AuthError::Validation(_) => ErrorKind::UnprocessableEntity,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError
    ///
    /// Server-side details never leave the process; they are only logged.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(errors) => AppError::validation(errors.clone()),
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            AuthError::DuplicateUser => AppError::conflict(self.to_string())
                .with_action("Sign in with the existing account instead"),
            AuthError::InvalidToken => AppError::unauthorized(self.to_string())
                .with_action("Sign in again or refresh the access token"),
            AuthError::InsufficientPermissions => AppError::forbidden(self.to_string())
                .with_action("Use an account with a higher role"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InsufficientPermissions => {
                tracing::warn!("Request rejected by role check");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        AuthError::Validation(errors)
    }
}

/// Unreadable bodies are reported as a validation failure of the body itself
impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(ValidationErrors::single("body", rejection.body_text()))
    }
}
