//! Verify Email Use Case

use std::sync::Arc;

use crate::application::token::TokenAuthority;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::token_type::TokenType;
use crate::error::{AuthError, AuthResult};

pub struct VerifyEmailUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    authority: Arc<TokenAuthority>,
}

impl<R> VerifyEmailUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, authority: Arc<TokenAuthority>) -> Self {
        Self { repo, authority }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        let claims = self
            .authority
            .verify_typed(token, TokenType::Verification)
            .map_err(|_| AuthError::InvalidVerificationToken)?;

        let user = self
            .repo
            .find_by_id(&claims.user_id())
            .await?
            .ok_or(AuthError::InvalidVerificationToken)?;

        if user.email_verified {
            return Err(AuthError::EmailAlreadyVerified);
        }

        if !self.repo.mark_email_verified(&user.user_id).await? {
            return Err(AuthError::EmailAlreadyVerified);
        }

        tracing::info!(user_id = %user.user_id, "Email verified");

        Ok(())
    }
}
