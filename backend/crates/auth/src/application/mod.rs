//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod check_access;
pub mod config;
pub mod current_user;
pub mod refresh_token;
pub mod sign_in;
pub mod sign_up;
pub mod token_issuer;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use check_access::CheckAccessUseCase;
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use refresh_token::RefreshTokenUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use token_issuer::TokenPair;
