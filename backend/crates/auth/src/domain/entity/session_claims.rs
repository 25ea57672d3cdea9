//! Session Claims
//!
//! The payload signed into every token. Tokens are never stored server side;
//! validity is the signature, the expiry, and the embedded `tokenVersion`
//! still matching the user's current counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::value_object::{token_type::TokenType, user_id::UserId, user_role::UserRole};

/// Identity a token is issued for, snapshotted at issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: UserId,
    pub email: String,
    pub role: UserRole,
    pub token_version: i32,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.as_str().to_string(),
            role: user.user_role,
            token_version: user.token_version,
        }
    }
}

/// Wire form: `{ userId, email, role, tokenVersion, type, iat, exp }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub token_version: i32,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Issued at, unix seconds
    pub iat: i64,
    /// Expiry, unix seconds
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(
        subject: &TokenSubject,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: *subject.user_id.as_uuid(),
            email: subject.email.clone(),
            role: subject.role,
            token_version: subject.token_version,
            token_type,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    #[inline]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            user_id: self.user_id(),
            email: self.email.clone(),
            role: self.role,
            token_version: self.token_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let subject = TokenSubject {
            user_id: UserId::from_uuid(Uuid::nil()),
            email: "writer@example.com".to_string(),
            role: UserRole::Admin,
            token_version: 3,
        };
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = SessionClaims::new(
            &subject,
            TokenType::Access,
            now,
            now + chrono::Duration::minutes(15),
        );

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userId": "00000000-0000-0000-0000-000000000000",
                "email": "writer@example.com",
                "role": "ADMIN",
                "tokenVersion": 3,
                "type": "access",
                "iat": 1_700_000_000,
                "exp": 1_700_000_900,
            })
        );
        assert_eq!(claims.subject(), subject);
    }
}
