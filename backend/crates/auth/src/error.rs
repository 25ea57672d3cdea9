//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Credential failures are split on purpose: a request that carries no
//! credential is `401`, a request whose credential is unusable (bad
//! signature, expired, revoked) is `403`. Clients see a generic message
//! for every `403` so the reason is only visible in logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential cookie on the request
    #[error("Access denied. No token provided.")]
    NoCredential,

    /// Bad signature, malformed token, or wrong token type
    #[error("Invalid token")]
    InvalidToken,

    /// Token past its expiry
    #[error("Token expired")]
    ExpiredToken,

    /// Token version no longer matches, or the user is gone
    #[error("Stale session")]
    StaleSession,

    /// Wrong email or password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Route requires the ADMIN role
    #[error("Admin access required")]
    AdminRequired,

    /// Email already registered
    #[error("Email is already registered")]
    EmailTaken,

    /// User name already registered
    #[error("Username is already taken")]
    UserNameTaken,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Email verification requested twice
    #[error("Email is already verified")]
    EmailAlreadyVerified,

    /// Verification token unusable
    #[error("Invalid or expired verification token")]
    InvalidVerificationToken,

    /// Reset token unusable or already used
    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    /// Token signing failed; only a misconfigured key gets here
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// Input rejected by a value object
    #[error(transparent)]
    App(#[from] AppError),

    /// Database error, classified by the kernel (503 when the pool or
    /// server is unavailable, 500 otherwise)
    #[error("Database error: {0}")]
    Database(AppError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::NoCredential | AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::StaleSession
            | AuthError::AdminRequired => ErrorKind::Forbidden,
            AuthError::EmailTaken | AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailAlreadyVerified
            | AuthError::InvalidVerificationToken
            | AuthError::InvalidResetToken => ErrorKind::BadRequest,
            AuthError::App(e) | AuthError::Database(e) => e.kind(),
            AuthError::Signing(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::App(e) => e,
            AuthError::InvalidToken | AuthError::ExpiredToken | AuthError::StaleSession => {
                AppError::forbidden(SESSION_EXPIRED).with_action("Please sign in again")
            }
            AuthError::Database(e) if e.kind() != ErrorKind::InternalServerError => e,
            AuthError::Signing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = ?e, "Auth database error");
            }
            AuthError::Signing(msg) => {
                tracing::error!(message = %msg, "Token signing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::App(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken | AuthError::StaleSession => {
                tracing::warn!(error = %self, "Rejected credential");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Database(AppError::from(err))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
