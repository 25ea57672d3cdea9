//! User Entity
//!
//! The account record as the auth core sees it. Blog profile fields (bio,
//! avatar) belong to the profile module and are not loaded here.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
    user_role::UserRole,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub email: Email,
    pub user_name: UserName,
    /// Display name
    pub name: Option<String>,
    pub password_hash: UserPassword,
    pub user_role: UserRole,
    /// Bumped to revoke every token issued so far
    pub token_version: i32,
    pub email_verified: bool,
    pub email_verified_at: Option<DateTime<Utc>>,
    /// Soft-delete marker; a deleted user cannot authenticate
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New unverified account with role `USER` and token version 0.
    pub fn new(
        email: Email,
        user_name: UserName,
        name: Option<String>,
        password_hash: UserPassword,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            user_name,
            name,
            password_hash,
            user_role: UserRole::default(),
            token_version: 0,
            email_verified: false,
            email_verified_at: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    #[inline]
    pub fn can_login(&self) -> bool {
        !self.is_deleted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn sample() -> User {
        let raw = RawPassword::for_login("irrelevant".to_string());
        User::new(
            Email::new("writer@example.com").unwrap(),
            UserName::new("writer").unwrap(),
            Some("Writer".to_string()),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample();
        assert_eq!(user.token_version, 0);
        assert_eq!(user.user_role, UserRole::User);
        assert!(!user.email_verified);
        assert!(user.can_login());
    }

    #[test]
    fn test_deleted_user_cannot_login() {
        let mut user = sample();
        user.deleted_at = Some(Utc::now());
        assert!(!user.can_login());
    }
}
