//! User Password Value Objects
//!
//! `RawPassword` is user input checked against the password policy,
//! `UserPassword` is the stored Argon2id hash. Hashing itself lives in
//! `platform::password`; this module maps its errors into client messages.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

/// Password typed by the user. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Policy-checked password for registration and resets.
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| {
            let action = match e {
                PasswordPolicyError::TooShort { .. } => "Please choose a longer password",
                PasswordPolicyError::TooLong { .. } => "Please choose a shorter password",
                PasswordPolicyError::EmptyOrWhitespace => "Please enter a password",
                PasswordPolicyError::InvalidCharacter => {
                    "Please remove any special control characters"
                }
                PasswordPolicyError::Common => "Please choose a less common password",
            };
            AppError::bad_request(e.to_string()).with_action(action)
        })?;

        Ok(Self(clear_text))
    }

    /// Login attempt. Not policy-checked so that a policy change never locks
    /// out existing accounts.
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::unchecked(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored password hash (PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        raw.0
            .hash(pepper)
            .map(Self)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_policy_messages() {
        let err = RawPassword::new("short".to_string()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.action(), Some("Please choose a longer password"));

        let err = RawPassword::new("password123".to_string()).unwrap_err();
        assert_eq!(err.action(), Some("Please choose a less common password"));
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("my first blog post".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&raw, None));
        assert!(!hashed.verify(&RawPassword::for_login("my second blog post".into()), None));
    }

    #[test]
    fn test_login_password_skips_policy() {
        // An account created under an older, weaker policy must still log in.
        let stored = RawPassword::for_login("short".to_string());
        let hashed = UserPassword::from_raw(&stored, None).unwrap();
        assert!(hashed.verify(&RawPassword::for_login("short".to_string()), None));
    }

    #[test]
    fn test_phc_string_from_storage() {
        let raw = RawPassword::new("my first blog post".to_string()).unwrap();
        let phc = UserPassword::from_raw(&raw, None)
            .unwrap()
            .as_phc_string()
            .to_string();

        let restored = UserPassword::from_phc_string(phc).unwrap();
        assert!(restored.verify(&raw, None));
        assert_eq!(
            UserPassword::from_phc_string("garbage").unwrap_err().status_code(),
            500
        );
    }
}
