//! User Name Value Object
//!
//! The public handle used in profile URLs (`/users/{username}`). Stored in
//! lower case so uniqueness is case-insensitive.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 30;

const RESERVED: &[&str] = &["admin", "api", "me", "root", "support"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// ASCII letters, digits and `_`, 3-30 characters, not reserved.
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let name = raw.as_ref().trim().to_ascii_lowercase();
        let len = name.chars().count();

        if len < USER_NAME_MIN_LENGTH || len > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be between {} and {} characters",
                USER_NAME_MIN_LENGTH, USER_NAME_MAX_LENGTH
            )));
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(AppError::bad_request(
                "Username may only contain letters, digits and underscores",
            ));
        }

        if RESERVED.contains(&name.as_str()) {
            return Err(AppError::bad_request("Username is reserved"));
        }

        Ok(Self(name))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
