//! Auth Middleware
//!
//! Access control for protected routes:
//! 1. [`require_auth`] reads the bearer token, validates it and attaches an
//!    [`AuthContext`] to the request.
//! 2. [`require_role`] admits the request only if the attached role fits.
//!
//! ```rust,ignore
//! let admin_only = Router::new()
//!     .route("/posts", post(create_post))
//!     .route_layer(from_fn_with_state(RoleGate::new([UserRole::Editor]), require_role))
//!     .route_layer(from_fn_with_state(AuthGate::new(config), require_auth));
//! ```

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::client::{BearerError, extract_bearer};
use std::sync::Arc;

use crate::application::CheckAccessUseCase;
use crate::application::config::AuthConfig;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::AuthError;

/// Identity of an authenticated request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserId,
    pub role: UserRole,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .ok_or(AuthError::MissingCredentials("Authentication required"))
    }
}

// ============================================================================
// Authentication
// ============================================================================

/// State of [`require_auth`]
#[derive(Clone)]
pub struct AuthGate {
    check: CheckAccessUseCase,
}

impl AuthGate {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            check: CheckAccessUseCase::new(config),
        }
    }
}

/// Middleware that requires a valid access token
pub async fn require_auth(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(req.headers()).map_err(|e| match e {
        BearerError::Missing => AuthError::MissingCredentials("Authorization header is required"),
        BearerError::Malformed => {
            AuthError::MissingCredentials("Authorization header format must be 'Bearer <token>'")
        }
    })?;

    let claims = gate.check.validate(token)?;

    req.extensions_mut().insert(AuthContext {
        user_id: claims.user_id(),
        role: claims.role,
    });

    Ok(next.run(req).await)
}

// ============================================================================
// Authorization
// ============================================================================

/// State of [`require_role`]: the roles a route admits
#[derive(Debug, Clone)]
pub struct RoleGate {
    allowed: Arc<[UserRole]>,
}

impl RoleGate {
    pub fn new(allowed: impl IntoIterator<Item = UserRole>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Admin passes every gate; otherwise the role must satisfy one allowed role
    ///
    /// Matching follows the role hierarchy, not exact equality: a gate that
    /// allows `User` also admits `Editor`.
    pub fn admits(&self, role: UserRole) -> bool {
        role.is_admin() || self.allowed.iter().any(|r| role.satisfies(*r))
    }
}

/// Middleware that requires one of the gate's roles
///
/// Must run after [`require_auth`].
pub async fn require_role(
    State(gate): State<RoleGate>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let context = req
        .extensions()
        .get::<AuthContext>()
        .copied()
        .ok_or(AuthError::MissingCredentials("Authentication required"))?;

    if !gate.admits(context.role) {
        tracing::debug!(
            user_id = %context.user_id,
            role = %context.role,
            "Role not admitted"
        );
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{seeded, test_config};
    use crate::application::token_issuer::issue_token_pair;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use tower::ServiceExt;

    async fn whoami(context: AuthContext) -> String {
        format!("{}:{}", context.user_id, context.role)
    }

    fn app(config: Arc<AuthConfig>) -> Router {
        let editors = Router::new()
            .route("/editor", get(|| async { "ok" }))
            .route_layer(from_fn_with_state(
                RoleGate::new([UserRole::Editor]),
                require_role,
            ));

        Router::new()
            .route("/whoami", get(whoami))
            .merge(editors)
            .route_layer(from_fn_with_state(AuthGate::new(config), require_auth))
    }

    fn request(uri: &str, authorization: Option<String>) -> Request {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn bearer_for(role: UserRole) -> (Arc<AuthConfig>, String) {
        let (_, config, user) = seeded(role).await;
        let pair = issue_token_pair(&config, user).unwrap();
        (config, format!("Bearer {}", pair.access_token))
    }

    #[test]
    fn test_role_gate() {
        let editor_gate = RoleGate::new([UserRole::Editor]);
        assert!(editor_gate.admits(UserRole::Admin));
        assert!(editor_gate.admits(UserRole::Editor));
        assert!(!editor_gate.admits(UserRole::User));

        let admin_gate = RoleGate::new([UserRole::Admin]);
        assert!(!admin_gate.admits(UserRole::Editor));

        let user_gate = RoleGate::new([UserRole::User]);
        assert!(user_gate.admits(UserRole::User));
        assert!(user_gate.admits(UserRole::Editor));

        // Admin overrides even an empty allow list
        assert!(RoleGate::new([]).admits(UserRole::Admin));
        assert!(!RoleGate::new([]).admits(UserRole::Editor));
    }

    #[tokio::test]
    async fn test_context_is_attached() {
        let (config, bearer) = bearer_for(UserRole::Editor).await;

        let response = app(config)
            .oneshot(request("/whoami", Some(bearer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"1:editor");
    }

    #[tokio::test]
    async fn test_missing_and_malformed_header() {
        let app = app(test_config());

        let missing = app.clone().oneshot(request("/whoami", None)).await.unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(missing.headers()[header::WWW_AUTHENTICATE], "Bearer");

        let malformed = app
            .oneshot(request("/whoami", Some("Token abc".to_string())))
            .await
            .unwrap();
        assert_eq!(malformed.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token() {
        let (_, bearer) = bearer_for(UserRole::Admin).await;

        // Signed with another process's secret
        let response = app(test_config())
            .oneshot(request("/whoami", Some(bearer)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_require_role_editor() {
        for (role, expected) in [
            (UserRole::Admin, StatusCode::OK),
            (UserRole::Editor, StatusCode::OK),
            (UserRole::User, StatusCode::FORBIDDEN),
        ] {
            let (config, bearer) = bearer_for(role).await;
            let response = app(config)
                .oneshot(request("/editor", Some(bearer)))
                .await
                .unwrap();
            assert_eq!(response.status(), expected, "role {role}");
        }
    }

    #[tokio::test]
    async fn test_require_role_without_auth() {
        let app = Router::new().route("/editor", get(|| async { "ok" })).route_layer(
            from_fn_with_state(RoleGate::new([UserRole::Editor]), require_role),
        );

        let response = app.oneshot(request("/editor", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
