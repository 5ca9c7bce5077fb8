//! Token Issuing
//!
//! Mints the access/refresh pair handed out by login, register and refresh.

use chrono::{DateTime, Duration, Utc};
use platform::token;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::claims::{AccessClaims, RefreshClaims};
use crate::error::{AuthError, AuthResult};

/// Freshly issued credentials for `user`
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry of the access token
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

fn lifetime(ttl: std::time::Duration) -> AuthResult<Duration> {
    Duration::from_std(ttl).map_err(|e| AuthError::Internal(format!("Invalid token lifetime: {e}")))
}

/// Issue a token pair stamped with the current time
pub fn issue_token_pair(config: &AuthConfig, user: User) -> AuthResult<TokenPair> {
    issue_token_pair_at(config, user, Utc::now())
}

/// Issue a token pair as if the current time were `now`
///
/// Timestamps are truncated to whole seconds so `expires_at` matches the
/// `exp` claim exactly.
pub fn issue_token_pair_at(
    config: &AuthConfig,
    user: User,
    now: DateTime<Utc>,
) -> AuthResult<TokenPair> {
    let issued_at = DateTime::<Utc>::from_timestamp(now.timestamp(), 0)
        .ok_or_else(|| AuthError::Internal("Clock out of range".to_string()))?;

    let access_expires_at = issued_at
        .checked_add_signed(lifetime(config.access_token_ttl)?)
        .ok_or_else(|| AuthError::Internal("Access token expiry overflow".to_string()))?;
    let refresh_expires_at = issued_at
        .checked_add_signed(lifetime(config.refresh_token_ttl)?)
        .ok_or_else(|| AuthError::Internal("Refresh token expiry overflow".to_string()))?;

    let access = AccessClaims::new(user.user_id, user.user_role, issued_at, access_expires_at);
    let refresh = RefreshClaims::new(user.user_id, issued_at, refresh_expires_at);

    let access_token = token::encode(&access, config.secret())
        .map_err(|e| AuthError::Internal(e.to_string()))?;
    let refresh_token = token::encode(&refresh, config.secret())
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        expires_at: access_expires_at,
        user,
    })
}
