//! In-Memory Repository Implementation
//!
//! Used by tests and local development without a database. All state sits
//! behind one lock so the uniqueness check and the insert are atomic.

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, phone::Phone, user_id::UserId, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    users: BTreeMap<i64, User>,
}

impl MemoryState {
    fn holds(&self, email: &Email, phone: &Phone) -> bool {
        self.users
            .values()
            .any(|u| u.email == *email || u.phone == *phone)
    }
}

/// Credential store kept in process memory
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remove a user, returning whether it existed
    pub async fn remove(&self, user_id: UserId) -> bool {
        self.state
            .write()
            .await
            .users
            .remove(&user_id.value())
            .is_some()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut state = self.state.write().await;

        if state.holds(&user.email, &user.phone) {
            return Err(AuthError::DuplicateUser);
        }

        state.last_id += 1;
        let id = state.last_id;
        let now = Utc::now();
        let stored = User {
            user_id: UserId::new(id),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            password_hash: user.password_hash.clone(),
            user_role: user.user_role,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(id, stored.clone());

        tracing::debug!(user_id = %stored.user_id, "User stored in memory");

        Ok(stored)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self.state.read().await.users.get(&user_id.value()).cloned())
    }

    async fn find_by_phone(&self, phone: &Phone) -> AuthResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.phone == *phone).cloned())
    }

    async fn exists_by_email_or_phone(&self, email: &Email, phone: &Phone) -> AuthResult<bool> {
        Ok(self.state.read().await.holds(email, phone))
    }

    async fn update_password(
        &self,
        user_id: UserId,
        password_hash: &UserPassword,
    ) -> AuthResult<bool> {
        let mut state = self.state.write().await;
        match state.users.get_mut(&user_id.value()) {
            Some(user) => {
                user.password_hash = password_hash.clone();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        display_name::DisplayName, user_password::RawPassword, user_role::UserRole,
    };

    fn new_user(email: &str, phone: &str) -> NewUser {
        let raw = RawPassword::new("password123".to_string()).unwrap();
        NewUser::new(
            DisplayName::new("Alice").unwrap(),
            Email::new(email).unwrap(),
            Phone::new(phone).unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();
        let a = repo.create(&new_user("a@example.com", "+100000001")).await.unwrap();
        let b = repo.create(&new_user("b@example.com", "+100000002")).await.unwrap();

        assert_eq!(a.user_id.value(), 1);
        assert_eq!(b.user_id.value(), 2);
        assert_eq!(a.user_role, UserRole::User);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_or_phone_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(&new_user("a@example.com", "+100000001")).await.unwrap();

        let same_email = repo.create(&new_user("a@example.com", "+100000009")).await;
        assert!(matches!(same_email, Err(AuthError::DuplicateUser)));

        let same_phone = repo.create(&new_user("z@example.com", "+100000001")).await;
        assert!(matches!(same_phone, Err(AuthError::DuplicateUser)));

        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_registration_stores_one() {
        let repo = InMemoryUserRepository::new();
        let user = new_user("race@example.com", "+100000003");

        let (first, second) = tokio::join!(repo.create(&user), repo.create(&user));

        assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookup_and_password_update() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(&new_user("a@example.com", "+100000001")).await.unwrap();

        let phone = Phone::new("+100000001").unwrap();
        let found = repo.find_by_phone(&phone).await.unwrap().unwrap();
        assert_eq!(found.user_id, created.user_id);

        let email = Email::new("a@example.com").unwrap();
        let other = Phone::new("+199999999").unwrap();
        assert!(repo.exists_by_email_or_phone(&email, &other).await.unwrap());

        let raw = RawPassword::new("new-password".to_string()).unwrap();
        let hash = UserPassword::from_raw(&raw, None).unwrap();
        assert!(repo.update_password(created.user_id, &hash).await.unwrap());
        let updated = repo.find_by_id(created.user_id).await.unwrap().unwrap();
        assert!(updated.password_hash.verify(&raw, None));

        assert!(!repo.update_password(UserId::new(999), &hash).await.unwrap());
        assert!(repo.remove(created.user_id).await);
        assert!(repo.find_by_id(created.user_id).await.unwrap().is_none());
    }
}
