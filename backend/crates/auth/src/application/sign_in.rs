//! Sign In Use Case
//!
//! Authenticates a user by phone and password and issues tokens.

use std::fmt;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_issuer::{TokenPair, issue_token_pair};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    phone::Phone,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
///
/// Kept as raw strings: a phone or password that fails validation is
/// reported exactly like a wrong one.
pub struct SignInInput {
    pub phone: String,
    pub password: String,
}

impl fmt::Debug for SignInInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInInput")
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<TokenPair> {
        let phone = Phone::new(&input.phone).map_err(|_| AuthError::InvalidCredentials)?;
        let password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(user) = self.repo.find_by_phone(&phone).await? else {
            UserPassword::verify_absent(&password, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let pair = issue_token_pair(&self.config, user)?;

        tracing::info!(
            user_id = %pair.user.user_id,
            role = %pair.user.user_role,
            "User signed in"
        );

        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{TEST_PASSWORD, TEST_PHONE, seeded};
    use crate::domain::value_object::{claims::AccessClaims, user_role::UserRole};
    use std::time::Instant;

    fn input(phone: &str, password: &str) -> SignInInput {
        SignInInput {
            phone: phone.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let (repo, config, user) = seeded(UserRole::Editor).await;
        let use_case = SignInUseCase::new(repo, config.clone());

        let pair = use_case.execute(input(TEST_PHONE, TEST_PASSWORD)).await.unwrap();

        let claims: AccessClaims =
            platform::token::decode(&pair.access_token, config.secret()).unwrap();
        assert_eq!(claims.user_id(), user.user_id);
        assert_eq!(claims.role, UserRole::Editor);
        assert_eq!(claims.sub, user.user_id.to_string());
        assert_eq!(pair.expires_at.timestamp(), claims.exp);
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[tokio::test]
    async fn test_login_accepts_formatted_phone() {
        let (repo, config, _) = seeded(UserRole::User).await;
        let use_case = SignInUseCase::new(repo, config);

        assert!(use_case.execute(input("+1 234-567-890", TEST_PASSWORD)).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_phone_and_wrong_password_are_identical() {
        let (repo, config, _) = seeded(UserRole::User).await;
        let use_case = SignInUseCase::new(repo, config);

        let wrong_password = use_case
            .execute(input(TEST_PHONE, "not-the-password"))
            .await
            .unwrap_err();
        let unknown_phone = use_case
            .execute(input("+1999999999", TEST_PASSWORD))
            .await
            .unwrap_err();
        let garbage_phone = use_case.execute(input("???", TEST_PASSWORD)).await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_phone, AuthError::InvalidCredentials));
        assert!(matches!(garbage_phone, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_phone.to_string());
    }

    #[tokio::test]
    async fn test_unknown_phone_still_pays_for_hashing() {
        let (repo, config, _) = seeded(UserRole::User).await;
        let use_case = SignInUseCase::new(repo, config);

        // First miss builds the stand-in hash
        let _ = use_case.execute(input("+1999999999", TEST_PASSWORD)).await;

        let started = Instant::now();
        let _ = use_case.execute(input(TEST_PHONE, "not-the-password")).await;
        let wrong_password = started.elapsed();

        let started = Instant::now();
        let _ = use_case.execute(input("+1888888888", TEST_PASSWORD)).await;
        let unknown_phone = started.elapsed();

        assert!(
            unknown_phone * 4 >= wrong_password,
            "unknown phone took {unknown_phone:?}, wrong password took {wrong_password:?}"
        );
    }
}
