//! Authenticate Use Case
//!
//! Turns a presented token into trusted claims. Order of checks:
//! presence, signature and expiry, token type, then the token version
//! against the user's current counter.

use std::sync::Arc;

use crate::application::token::TokenAuthority;
use crate::domain::entity::session_claims::SessionClaims;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::token_type::TokenType;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    authority: Arc<TokenAuthority>,
}

impl<R> AuthenticateUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, authority: Arc<TokenAuthority>) -> Self {
        Self { repo, authority }
    }

    /// Authenticate an access token
    pub async fn execute(&self, token: Option<&str>) -> AuthResult<SessionClaims> {
        self.execute_as(token, TokenType::Access).await
    }

    /// Authenticate a token of the given type
    pub async fn execute_as(
        &self,
        token: Option<&str>,
        expected: TokenType,
    ) -> AuthResult<SessionClaims> {
        let token = token.ok_or(AuthError::NoCredential)?;

        let claims = self.authority.verify_typed(token, expected)?;

        let current = self.repo.find_token_version(&claims.user_id()).await?;
        if current != Some(claims.token_version) {
            tracing::debug!(
                user_id = %claims.user_id,
                token_version = claims.token_version,
                current_version = ?current,
                "Stale session rejected"
            );
            return Err(AuthError::StaleSession);
        }

        Ok(claims)
    }
}
