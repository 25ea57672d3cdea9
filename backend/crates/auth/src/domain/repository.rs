//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Every method that changes credentials or role also increments
//! `token_version` in the same statement, so the change and the revocation
//! of previously issued tokens are a single atomic write.

use crate::domain::entity::user::User;
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
    user_role::UserRole,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find a live (not soft-deleted) user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find a live user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email is taken (deleted users included)
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Check if user name is taken (deleted users included)
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Current token version of a live user
    async fn find_token_version(&self, user_id: &UserId) -> AuthResult<Option<i32>>;

    /// Increment the token version; returns the new value, `None` if no
    /// live user matched
    async fn increment_token_version(&self, user_id: &UserId) -> AuthResult<Option<i32>>;

    /// Replace the password hash and increment the token version. With
    /// `expected_version`, the write only happens while the stored version
    /// still equals it; `None` is returned otherwise.
    async fn update_password(
        &self,
        user_id: &UserId,
        password_hash: &UserPassword,
        expected_version: Option<i32>,
    ) -> AuthResult<Option<i32>>;

    /// Change the role and increment the token version
    async fn update_role(&self, user_id: &UserId, role: UserRole) -> AuthResult<Option<i32>>;

    /// Soft-delete the user and increment the token version
    async fn soft_delete(&self, user_id: &UserId) -> AuthResult<Option<i32>>;

    /// Mark the email verified; `false` if it already was or no user matched
    async fn mark_email_verified(&self, user_id: &UserId) -> AuthResult<bool>;
}
