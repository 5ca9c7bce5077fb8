//! Check Access Use Case
//!
//! Validates an access token. Purely cryptographic: no store lookup, so a
//! token stays valid until expiry even if the user is deleted meanwhile.

use std::sync::Arc;

use platform::token;

use crate::application::config::AuthConfig;
use crate::domain::value_object::claims::AccessClaims;
use crate::error::{AuthError, AuthResult};

/// Check access use case
#[derive(Clone)]
pub struct CheckAccessUseCase {
    config: Arc<AuthConfig>,
}

impl CheckAccessUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Decode and verify `access_token`
    pub fn validate(&self, access_token: &str) -> AuthResult<AccessClaims> {
        token::decode(access_token, self.config.secret()).map_err(|e| {
            tracing::debug!(reason = %e, "Access token rejected");
            AuthError::InvalidToken
        })
    }
}
