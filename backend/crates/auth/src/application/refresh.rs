//! Refresh Use Case
//!
//! Exchanges a live refresh token for a new access token. The refresh token
//! goes through the same version check as an access token, so revoking
//! sessions also ends refreshes.

use std::sync::Arc;

use crate::application::authenticate::AuthenticateUseCase;
use crate::application::config::AuthConfig;
use crate::application::session;
use crate::application::token::TokenAuthority;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::token_type::TokenType;
use crate::error::AuthResult;

pub struct RefreshUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    authority: Arc<TokenAuthority>,
    config: Arc<AuthConfig>,
}

impl<R> RefreshUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, authority: Arc<TokenAuthority>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            authority,
            config,
        }
    }

    /// Returns the new access token
    pub async fn execute(&self, refresh_token: Option<&str>) -> AuthResult<String> {
        let claims = AuthenticateUseCase::new(self.repo.clone(), self.authority.clone())
            .execute_as(refresh_token, TokenType::Refresh)
            .await?;

        let access_token = session::issue(
            &self.authority,
            &claims.subject(),
            TokenType::Access,
            self.config.access_ttl,
        )?;

        tracing::debug!(user_id = %claims.user_id, "Access token refreshed");

        Ok(access_token)
    }
}
