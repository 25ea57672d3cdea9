//! Admin Use Case
//!
//! Account actions an administrator takes on another user. Each one bumps
//! the target's token version so the change applies to live sessions at once.

use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::revoke::RevokeSessionsUseCase;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

pub struct AdminUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> AdminUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn revoke_sessions(&self, admin_id: &UserId, user_id: &UserId) -> AuthResult<i32> {
        let version = RevokeSessionsUseCase::new(self.repo.clone())
            .execute(user_id)
            .await?;

        tracing::info!(admin_id = %admin_id, user_id = %user_id, "Admin revoked sessions");

        Ok(version)
    }

    pub async fn change_role(
        &self,
        admin_id: &UserId,
        user_id: &UserId,
        role: UserRole,
    ) -> AuthResult<i32> {
        let version = self
            .repo
            .update_role(user_id, role)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(
            admin_id = %admin_id,
            user_id = %user_id,
            role = %role,
            token_version = version,
            "Admin changed role"
        );

        Ok(version)
    }

    pub async fn reset_password(
        &self,
        admin_id: &UserId,
        user_id: &UserId,
        new_password: String,
    ) -> AuthResult<i32> {
        let raw_password = RawPassword::new(new_password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let version = self
            .repo
            .update_password(user_id, &password_hash, None)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(
            admin_id = %admin_id,
            user_id = %user_id,
            token_version = version,
            "Admin reset password"
        );

        Ok(version)
    }

    /// Soft-delete another user. Their live tokens go stale and their
    /// email and user name stay reserved.
    pub async fn delete_user(&self, admin_id: &UserId, user_id: &UserId) -> AuthResult<i32> {
        if admin_id == user_id {
            return Err(AppError::bad_request("You cannot delete your own account").into());
        }

        let version = self
            .repo
            .soft_delete(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(admin_id = %admin_id, user_id = %user_id, "Admin deleted user");

        Ok(version)
    }
}
