//! Revoke Sessions Use Case
//!
//! Bumps the user's token version so every token issued so far stops
//! authenticating.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct RevokeSessionsUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> RevokeSessionsUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the new token version
    pub async fn execute(&self, user_id: &UserId) -> AuthResult<i32> {
        let version = self
            .repo
            .increment_token_version(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %user_id, token_version = version, "Sessions revoked");

        Ok(version)
    }
}
