//! User Entity
//!
//! An account with its credentials. Intentionally not `Serialize`: the
//! password hash must never reach a response body.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, phone::Phone, user_id::UserId,
    user_password::UserPassword, user_role::UserRole,
};

/// Persisted user
#[derive(Debug, Clone)]
pub struct User {
    /// Database-assigned identifier
    pub user_id: UserId,
    pub name: DisplayName,
    /// Unique
    pub email: Email,
    /// Unique, used for login
    pub phone: Phone,
    pub password_hash: UserPassword,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user that has not been stored yet (no id)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: DisplayName,
    pub email: Email,
    pub phone: Phone,
    pub password_hash: UserPassword,
    pub user_role: UserRole,
}

impl NewUser {
    /// New account with the default `user` role
    pub fn new(name: DisplayName, email: Email, phone: Phone, password_hash: UserPassword) -> Self {
        Self {
            name,
            email,
            phone,
            password_hash,
            user_role: UserRole::default(),
        }
    }

    /// Override the role (seeding and tests)
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.user_role = role;
        self
    }
}
