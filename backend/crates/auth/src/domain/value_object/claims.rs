//! Token Claims
//!
//! Payloads of the two bearer token kinds. They are never persisted.
//!
//! The shapes are mutually exclusive on decode: access claims require
//! `role` and `sub`, which refresh tokens lack, and refresh claims refuse
//! unknown fields, which access tokens carry.

use chrono::{DateTime, Utc};
use platform::token::ExpiringClaims;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// Claims of a short-lived access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: i64,
    pub role: UserRole,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
    /// Issued at, seconds since the Unix epoch
    pub iat: i64,
    /// Stringified user id
    pub sub: String,
    /// Unique token id
    pub jti: String,
}

impl AccessClaims {
    pub fn new(
        user_id: UserId,
        role: UserRole,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.value(),
            role,
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn user_id(&self) -> UserId {
        UserId::new(self.user_id)
    }
}

impl ExpiringClaims for AccessClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}

/// Claims of a long-lived refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshClaims {
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl RefreshClaims {
    pub fn new(user_id: UserId, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.value(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn user_id(&self) -> UserId {
        UserId::new(self.user_id)
    }
}

impl ExpiringClaims for RefreshClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}
