//! Sign Up Use Case
//!
//! Creates a new user account, hands a verification token to the notifier
//! and signs the user in.

use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::{self, SessionTokens};
use crate::application::token::TokenAuthority;
use crate::domain::entity::{session_claims::TokenSubject, user::User};
use crate::domain::notifier::Notifier;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    token_type::TokenType,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub const NAME_MAX_LENGTH: usize = 100;

/// Sign up input
pub struct SignUpInput {
    pub name: Option<String>,
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
    pub tokens: SessionTokens,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    authority: Arc<TokenAuthority>,
    config: Arc<AuthConfig>,
    notifier: Arc<dyn Notifier>,
}

impl<R> SignUpUseCase<R>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let email = Email::new(input.email)?;
        let user_name = UserName::new(input.user_name)?;
        let name = normalize_name(input.name)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }
        if self.repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        // Validate and hash password
        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(email, user_name, name, password_hash);
        self.repo.create(&user).await?;

        let subject = TokenSubject::from(&user);
        let verification = session::issue(
            &self.authority,
            &subject,
            TokenType::Verification,
            self.config.verification_ttl,
        )?;
        self.notifier.verification_issued(&user, &verification);

        let tokens = session::issue_session(&self.authority, &self.config, &subject)?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(SignUpOutput { user, tokens })
    }
}

fn normalize_name(name: Option<String>) -> AuthResult<Option<String>> {
    let Some(name) = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(AppError::bad_request(format!(
            "Name must be at most {} characters",
            NAME_MAX_LENGTH
        ))
        .into());
    }

    Ok(Some(name))
}
