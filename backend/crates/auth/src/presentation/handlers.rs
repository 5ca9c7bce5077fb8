//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRequest, State};
use axum::http::StatusCode;
use kernel::validation::Validate;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangePasswordUseCase, CurrentUserUseCase, RefreshTokenUseCase, SignInUseCase, SignUpUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, RefreshRequest, RegisterRequest, TokenPairResponse,
    UserResponse,
};
use crate::presentation::middleware::AuthContext;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
        }
    }
}

/// JSON body whose rejections render as [`AuthError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct AuthJson<T>(pub T);

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    AuthJson(req): AuthJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<TokenPairResponse>)>
where
    R: UserRepository + Sync + 'static,
{
    let input = req.validate()?;

    let pair = SignUpUseCase::new(state.repo.clone(), state.config.clone())
        .execute(input)
        .await?;

    Ok((StatusCode::CREATED, Json(pair.into())))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    AuthJson(req): AuthJson<LoginRequest>,
) -> AuthResult<Json<TokenPairResponse>>
where
    R: UserRepository + Sync + 'static,
{
    let input = req.validate()?;

    let pair = SignInUseCase::new(state.repo.clone(), state.config.clone())
        .execute(input)
        .await?;

    Ok(Json(pair.into()))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    AuthJson(req): AuthJson<RefreshRequest>,
) -> AuthResult<Json<TokenPairResponse>>
where
    R: UserRepository + Sync + 'static,
{
    let refresh_token = req.validate()?;

    let pair = RefreshTokenUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&refresh_token)
        .await?;

    Ok(Json(pair.into()))
}

// ============================================================================
// Authenticated
// ============================================================================

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    context: AuthContext,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Sync + 'static,
{
    let user = CurrentUserUseCase::new(state.repo.clone())
        .execute(context.user_id)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/auth/password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    context: AuthContext,
    AuthJson(req): AuthJson<ChangePasswordRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Sync + 'static,
{
    let input = req.validate()?;

    ChangePasswordUseCase::new(state.repo.clone(), state.config.clone())
        .execute(context.user_id, input)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
