//! Sign Up Use Case
//!
//! Creates a new user account and signs it in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_issuer::{TokenPair, issue_token_pair};
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    phone::Phone,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input (already validated)
#[derive(Debug)]
pub struct SignUpInput {
    pub name: DisplayName,
    pub email: Email,
    pub phone: Phone,
    pub password: RawPassword,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<TokenPair> {
        // Fast path only; the store's unique constraints have the final say
        if self
            .repo
            .exists_by_email_or_phone(&input.email, &input.phone)
            .await?
        {
            return Err(AuthError::DuplicateUser);
        }

        let password_hash = UserPassword::from_raw(&input.password, self.config.pepper())?;

        let user = self
            .repo
            .create(&NewUser::new(
                input.name,
                input.email,
                input.phone,
                password_hash,
            ))
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.user_role,
            "User signed up"
        );

        issue_token_pair(&self.config, user)
    }
}
