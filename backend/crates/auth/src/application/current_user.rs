//! Current User Use Case

use std::sync::Arc;

use crate::domain::entity::{session_claims::SessionClaims, user::User};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct CurrentUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> CurrentUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, claims: &SessionClaims) -> AuthResult<User> {
        self.repo
            .find_by_id(&claims.user_id())
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
