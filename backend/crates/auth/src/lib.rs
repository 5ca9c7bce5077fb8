//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Register / login with phone + password
//! - Stateless JWT access tokens (15 min) and refresh tokens (7 days)
//! - Role hierarchy (Admin > Editor > User) enforced by middleware
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional server-side pepper
//! - HS256 signatures, zero leeway on expiry
//! - Unknown phone and wrong password are indistinguishable

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::value_object::user_role::UserRole;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryUserRepository, postgres::PgAuthRepository};
pub use presentation::middleware::{AuthContext, AuthGate, RoleGate, require_auth, require_role};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
