//! Change Password Use Case

use std::fmt;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Change password input
///
/// The new password is already policy-checked. The current one is kept
/// raw: anything that does not verify is simply wrong.
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: RawPassword,
}

impl fmt::Debug for ChangePasswordInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordInput")
            .field("current_password", &"[REDACTED]")
            .field("new_password", &self.new_password)
            .finish()
    }
}

/// Change password use case
pub struct ChangePasswordUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ChangePasswordUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, user_id: UserId, input: ChangePasswordInput) -> AuthResult<()> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let current =
            RawPassword::new(input.current_password).map_err(|_| AuthError::WrongPassword)?;
        if !user.password_hash.verify(&current, self.config.pepper()) {
            return Err(AuthError::WrongPassword);
        }

        let password_hash = UserPassword::from_raw(&input.new_password, self.config.pepper())?;

        if !self.repo.update_password(user_id, &password_hash).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "Password changed");

        Ok(())
    }
}
