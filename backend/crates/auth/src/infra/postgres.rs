//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, phone::Phone, user_id::UserId,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Column list shared by every user lookup
const USER_COLUMNS: &str = r#"
    u.id,
    u.name,
    u.email,
    u.phone,
    u.password_hash,
    r.name AS role_name,
    u.created_at,
    u.updated_at
"#;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, bind: UserFilter<'_>) -> AuthResult<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id WHERE {filter}"
        );
        let query = sqlx::query_as::<_, UserRow>(&sql);
        let query = match bind {
            UserFilter::Id(id) => query.bind(id),
            UserFilter::Phone(phone) => query.bind(phone),
        };

        let row = query.fetch_optional(&self.pool).await?;
        row.map(UserRow::into_user).transpose()
    }
}

enum UserFilter<'a> {
    Id(i64),
    Phone(&'a str),
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let result = sqlx::query_as::<_, (i64, DateTime<Utc>, DateTime<Utc>)>(
            r#"
            INSERT INTO users (
                name,
                email,
                phone,
                password_hash,
                role_id
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at, updated_at
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.phone.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.user_role.id())
        .fetch_one(&self.pool)
        .await;

        let (id, created_at, updated_at) = match result {
            Ok(row) => row,
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(error = %e, "User insert hit a unique constraint");
                return Err(AuthError::DuplicateUser);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(User {
            user_id: UserId::new(id),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            password_hash: user.password_hash.clone(),
            user_role: user.user_role,
            created_at,
            updated_at,
        })
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        self.find_one("u.id = $1", UserFilter::Id(user_id.value()))
            .await
    }

    async fn find_by_phone(&self, phone: &Phone) -> AuthResult<Option<User>> {
        self.find_one("u.phone = $1", UserFilter::Phone(phone.as_str()))
            .await
    }

    async fn exists_by_email_or_phone(&self, email: &Email, phone: &Phone) -> AuthResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users WHERE email = $1 OR phone = $2
            )
            "#,
        )
        .bind(email.as_str())
        .bind(phone.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_password(
        &self,
        user_id: UserId,
        password_hash: &UserPassword,
    ) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id.value())
        .bind(password_hash.as_phc_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    password_hash: String,
    role_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_role: UserRole = self
            .role_name
            .parse()
            .map_err(|e| AuthError::Internal(format!("Invalid role for user {}: {}", self.id, e)))?;

        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("User {}: {}", self.id, e.message())))?;

        Ok(User {
            user_id: UserId::new(self.id),
            name: DisplayName::from_db(self.name),
            email: Email::from_db(self.email),
            phone: Phone::from_db(self.phone),
            password_hash,
            user_role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
