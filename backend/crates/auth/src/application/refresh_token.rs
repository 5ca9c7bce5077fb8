//! Refresh Token Use Case
//!
//! Exchanges a valid refresh token for a new token pair. The presented
//! refresh token is not revoked; it stays usable until it expires.

use std::sync::Arc;

use platform::token;

use crate::application::config::AuthConfig;
use crate::application::token_issuer::{TokenPair, issue_token_pair};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::claims::RefreshClaims;
use crate::error::{AuthError, AuthResult};

/// Refresh token use case
pub struct RefreshTokenUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RefreshTokenUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let claims: RefreshClaims =
            token::decode(refresh_token, self.config.secret()).map_err(|e| {
                tracing::debug!(reason = %e, "Refresh token rejected");
                AuthError::InvalidToken
            })?;

        // The role is re-read so a changed role takes effect on refresh
        let user = self
            .repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = claims.user_id, "Refresh token for missing user");
                AuthError::InvalidToken
            })?;

        let pair = issue_token_pair(&self.config, user)?;

        tracing::info!(user_id = %pair.user.user_id, "Tokens refreshed");

        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::seeded;
    use crate::application::token_issuer::issue_token_pair_at;
    use crate::domain::value_object::user_role::UserRole;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_refresh_sets_access_expiry_from_now() {
        let (repo, config, user) = seeded(UserRole::User).await;
        let original = issue_token_pair(&config, user).unwrap();
        let use_case = RefreshTokenUseCase::new(repo, config.clone());

        let before = Utc::now().timestamp();
        let refreshed = use_case.execute(&original.refresh_token).await.unwrap();
        let after = Utc::now().timestamp();

        let ttl = config.access_token_ttl.as_secs() as i64;
        let expiry = refreshed.expires_at.timestamp();
        assert!(expiry >= before + ttl && expiry <= after + ttl);
    }

    #[tokio::test]
    async fn test_old_refresh_token_remains_usable() {
        let (repo, config, user) = seeded(UserRole::User).await;
        let original = issue_token_pair(&config, user).unwrap();
        let use_case = RefreshTokenUseCase::new(repo, config);

        assert!(use_case.execute(&original.refresh_token).await.is_ok());
        assert!(use_case.execute(&original.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_access_token_is_not_a_refresh_token() {
        let (repo, config, user) = seeded(UserRole::User).await;
        let pair = issue_token_pair(&config, user).unwrap();
        let use_case = RefreshTokenUseCase::new(repo, config);

        let result = use_case.execute(&pair.access_token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_expired_refresh_token_rejected() {
        let (repo, config, user) = seeded(UserRole::User).await;
        let past = Utc::now()
            - Duration::from_std(config.refresh_token_ttl).unwrap()
            - Duration::seconds(5);
        let stale = issue_token_pair_at(&config, user, past).unwrap();
        let use_case = RefreshTokenUseCase::new(repo, config);

        let result = use_case.execute(&stale.refresh_token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_deleted_user_cannot_refresh() {
        let (repo, config, user) = seeded(UserRole::User).await;
        let pair = issue_token_pair(&config, user.clone()).unwrap();
        repo.remove(user.user_id).await;
        let use_case = RefreshTokenUseCase::new(repo, config);

        let result = use_case.execute(&pair.refresh_token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_garbage_rejected() {
        let (repo, config, _) = seeded(UserRole::User).await;
        let use_case = RefreshTokenUseCase::new(repo, config);

        assert!(matches!(
            use_case.execute("not.a.token").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
