//! Session token pair issued at register, login and refresh.

use std::time::Duration;

use crate::application::config::AuthConfig;
use crate::application::token::TokenAuthority;
use crate::domain::entity::session_claims::TokenSubject;
use crate::domain::value_object::token_type::TokenType;
use crate::error::{AuthError, AuthResult};

/// Access and refresh tokens for one login
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issue an access + refresh pair for `subject`.
pub fn issue_session(
    authority: &TokenAuthority,
    config: &AuthConfig,
    subject: &TokenSubject,
) -> AuthResult<SessionTokens> {
    Ok(SessionTokens {
        access_token: issue(authority, subject, TokenType::Access, config.access_ttl)?,
        refresh_token: issue(authority, subject, TokenType::Refresh, config.refresh_ttl)?,
    })
}

/// Issue a single token with a `std` TTL from [`AuthConfig`].
pub fn issue(
    authority: &TokenAuthority,
    subject: &TokenSubject,
    token_type: TokenType,
    ttl: Duration,
) -> AuthResult<String> {
    let ttl = chrono::Duration::from_std(ttl)
        .map_err(|e| AuthError::Internal(format!("Invalid token TTL: {e}")))?;
    Ok(authority.issue(subject, token_type, ttl)?)
}
