//! Sign In Use Case
//!
//! Checks email and password and issues a fresh session token pair.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::{self, SessionTokens};
use crate::application::token::TokenAuthority;
use crate::domain::entity::{session_claims::TokenSubject, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user: User,
    pub tokens: SessionTokens,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    authority: Arc<TokenAuthority>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // A malformed email cannot belong to anyone
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .filter(User::can_login)
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::for_login(input.password);
        if !user
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            tracing::warn!(user_id = %user.user_id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let tokens =
            session::issue_session(&self.authority, &self.config, &TokenSubject::from(&user))?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { user, tokens })
    }
}
