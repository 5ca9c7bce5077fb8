//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::{
    email::Email, phone::Phone, user_id::UserId, user_password::UserPassword,
};
use crate::error::AuthResult;

/// Credential store
///
/// Email and phone uniqueness is enforced by the store itself; `create`
/// reports a collision as `AuthError::DuplicateUser` even when a prior
/// `exists_by_email_or_phone` check passed.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user and return it with its assigned id
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find user by phone
    async fn find_by_phone(&self, phone: &Phone) -> AuthResult<Option<User>>;

    /// Whether any user holds `email` or `phone`
    async fn exists_by_email_or_phone(&self, email: &Email, phone: &Phone) -> AuthResult<bool>;

    /// Replace the password hash; `false` when the user does not exist
    async fn update_password(
        &self,
        user_id: UserId,
        password_hash: &UserPassword,
    ) -> AuthResult<bool>;
}
