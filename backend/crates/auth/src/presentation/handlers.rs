//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    AdminUseCase, CurrentUserUseCase, PasswordResetUseCase, RefreshUseCase,
    RevokeSessionsUseCase, SessionTokens, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
    TokenAuthority, VerifyEmailUseCase,
};
use crate::domain::notifier::Notifier;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AdminPasswordRequest, AuthResponse, ChangeRoleRequest, ForgotPasswordRequest, LoginRequest,
    MessageResponse, RegisterRequest, ResetPasswordRequest, TokenVersionResponse, UserResponse,
    VerifyEmailQuery,
};
use crate::presentation::middleware::AuthContext;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub authority: Arc<TokenAuthority>,
    pub config: Arc<AuthConfig>,
    pub notifier: Arc<dyn Notifier>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    /// Build the state. Fails when the token secret is unusable.
    pub fn new(repo: R, config: AuthConfig, notifier: Arc<dyn Notifier>) -> AuthResult<Self> {
        let authority = TokenAuthority::new(&config.token_secret)?;

        Ok(Self {
            repo: Arc::new(repo),
            authority: Arc::new(authority),
            config: Arc::new(config),
            notifier,
        })
    }
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.authority.clone(),
        state.config.clone(),
        state.notifier.clone(),
    );

    let input = SignUpInput {
        name: req.name,
        user_name: req.username,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        session_cookies(&state.config, &output.tokens),
        Json(AuthResponse {
            message: "Registration successful. Please verify your email.".to_string(),
            user: UserResponse::from(&output.user),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.authority.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::OK,
        session_cookies(&state.config, &output.tokens),
        Json(AuthResponse {
            message: "Login successful".to_string(),
            user: UserResponse::from(&output.user),
        }),
    ))
}

// ============================================================================
// Logout / Refresh
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    (StatusCode::NO_CONTENT, clear_cookies(&state.config))
}

/// POST /api/auth/logout-all
pub async fn logout_all<R>(
    State(state): State<AuthAppState<R>>,
    AuthContext(claims): AuthContext,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    RevokeSessionsUseCase::new(state.repo.clone())
        .execute(&claims.user_id())
        .await?;

    Ok((StatusCode::NO_CONTENT, clear_cookies(&state.config)))
}

/// POST /api/auth/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.refresh_cookie_name);

    let use_case = RefreshUseCase::new(
        state.repo.clone(),
        state.authority.clone(),
        state.config.clone(),
    );
    let access_token = use_case.execute(token.as_deref()).await?;

    let cookie = state.config.access_cookie().build_set_cookie(&access_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Token refreshed")),
    ))
}

// ============================================================================
// Email verification / password reset
// ============================================================================

/// POST /api/auth/verify-email?token=
pub async fn verify_email<R>(
    State(state): State<AuthAppState<R>>,
    Query(query): Query<VerifyEmailQuery>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    VerifyEmailUseCase::new(state.repo.clone(), state.authority.clone())
        .execute(&query.token)
        .await?;

    Ok(Json(MessageResponse::new("Email verified successfully")))
}

/// POST /api/auth/forgot-password
pub async fn forgot_password<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    password_reset(&state).request(&req.email).await?;

    Ok(Json(MessageResponse::new(
        "If that email is registered, a reset link has been sent",
    )))
}

/// POST /api/auth/reset-password
pub async fn reset_password<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    password_reset(&state).reset(&req.token, req.password).await?;

    Ok((
        StatusCode::OK,
        clear_cookies(&state.config),
        Json(MessageResponse::new(
            "Password reset successful. Please log in again.",
        )),
    ))
}

// ============================================================================
// Current user
// ============================================================================

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    AuthContext(claims): AuthContext,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = CurrentUserUseCase::new(state.repo.clone())
        .execute(&claims)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Admin (behind require_auth + require_admin)
// ============================================================================

/// POST /api/admin/users/{user_id}/revoke-sessions
pub async fn admin_revoke_sessions<R>(
    State(state): State<AuthAppState<R>>,
    AuthContext(claims): AuthContext,
    Path(user_id): Path<Uuid>,
) -> AuthResult<Json<TokenVersionResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token_version = admin(&state)
        .revoke_sessions(&claims.user_id(), &UserId::from_uuid(user_id))
        .await?;

    Ok(Json(TokenVersionResponse {
        user_id,
        token_version,
    }))
}

/// PUT /api/admin/users/{user_id}/role
pub async fn admin_change_role<R>(
    State(state): State<AuthAppState<R>>,
    AuthContext(claims): AuthContext,
    Path(user_id): Path<Uuid>,
    Json(req): Json<ChangeRoleRequest>,
) -> AuthResult<Json<TokenVersionResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token_version = admin(&state)
        .change_role(&claims.user_id(), &UserId::from_uuid(user_id), req.role)
        .await?;

    Ok(Json(TokenVersionResponse {
        user_id,
        token_version,
    }))
}

/// POST /api/admin/users/{user_id}/password
pub async fn admin_reset_password<R>(
    State(state): State<AuthAppState<R>>,
    AuthContext(claims): AuthContext,
    Path(user_id): Path<Uuid>,
    Json(req): Json<AdminPasswordRequest>,
) -> AuthResult<Json<TokenVersionResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token_version = admin(&state)
        .reset_password(&claims.user_id(), &UserId::from_uuid(user_id), req.password)
        .await?;

    Ok(Json(TokenVersionResponse {
        user_id,
        token_version,
    }))
}

/// DELETE /api/admin/users/{user_id}
pub async fn admin_delete_user<R>(
    State(state): State<AuthAppState<R>>,
    AuthContext(claims): AuthContext,
    Path(user_id): Path<Uuid>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    admin(&state)
        .delete_user(&claims.user_id(), &UserId::from_uuid(user_id))
        .await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn password_reset<R>(state: &AuthAppState<R>) -> PasswordResetUseCase<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    PasswordResetUseCase::new(
        state.repo.clone(),
        state.authority.clone(),
        state.config.clone(),
        state.notifier.clone(),
    )
}

fn admin<R>(state: &AuthAppState<R>) -> AdminUseCase<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    AdminUseCase::new(state.repo.clone(), state.config.clone())
}

fn session_cookies(
    config: &AuthConfig,
    tokens: &SessionTokens,
) -> AppendHeaders<[(header::HeaderName, String); 2]> {
    AppendHeaders([
        (
            header::SET_COOKIE,
            config.access_cookie().build_set_cookie(&tokens.access_token),
        ),
        (
            header::SET_COOKIE,
            config.refresh_cookie().build_set_cookie(&tokens.refresh_token),
        ),
    ])
}

fn clear_cookies(config: &AuthConfig) -> AppendHeaders<[(header::HeaderName, String); 2]> {
    AppendHeaders([
        (header::SET_COOKIE, config.access_cookie().build_delete_cookie()),
        (header::SET_COOKIE, config.refresh_cookie().build_delete_cookie()),
    ])
}
