//! Password Reset Use Case
//!
//! Reset tokens embed the token version at issuance. The new password is
//! only stored while the stored version still matches, and storing it bumps
//! the version, so a reset token works once and any earlier reset token dies
//! with it. The match and the bump are one conditional write, which keeps
//! concurrent resets with the same token from both succeeding.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session;
use crate::application::token::TokenAuthority;
use crate::domain::entity::{session_claims::TokenSubject, user::User};
use crate::domain::notifier::Notifier;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    token_type::TokenType,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct PasswordResetUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    authority: Arc<TokenAuthority>,
    config: Arc<AuthConfig>,
    notifier: Arc<dyn Notifier>,
}

impl<R> PasswordResetUseCase<R>
where
    R: UserRepository,
{
    pub fn new(
        repo: Arc<R>,
        authority: Arc<TokenAuthority>,
        config: Arc<AuthConfig>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repo,
            authority,
            config,
            notifier,
        }
    }

    /// Issue a reset token if the email belongs to a live user. Unknown
    /// emails succeed silently.
    pub async fn request(&self, email: &str) -> AuthResult<()> {
        let Ok(email) = Email::new(email) else {
            return Ok(());
        };

        let Some(user) = self
            .repo
            .find_by_email(&email)
            .await?
            .filter(User::can_login)
        else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = session::issue(
            &self.authority,
            &TokenSubject::from(&user),
            TokenType::Reset,
            self.config.reset_ttl,
        )?;
        self.notifier.password_reset_issued(&user, &token);

        tracing::info!(user_id = %user.user_id, "Password reset requested");

        Ok(())
    }

    /// Store a new password for the token's user. Returns the new token version.
    pub async fn reset(&self, token: &str, new_password: String) -> AuthResult<i32> {
        let claims = self
            .authority
            .verify_typed(token, TokenType::Reset)
            .map_err(|_| AuthError::InvalidResetToken)?;
        let user_id = claims.user_id();

        let raw_password = RawPassword::new(new_password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let version = self
            .repo
            .update_password(&user_id, &password_hash, Some(claims.token_version))
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        tracing::info!(user_id = %user_id, token_version = version, "Password reset");

        Ok(version)
    }
}
