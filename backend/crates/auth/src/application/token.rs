//! Token Authority
//!
//! Issues and verifies HS256-signed session tokens. The authority is built
//! once at startup from [`AuthConfig::token_secret`] and shared read-only;
//! revocation is not its concern (see `authenticate`).

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::application::config::MIN_TOKEN_SECRET_LEN;
use crate::domain::entity::session_claims::{SessionClaims, TokenSubject};
use crate::domain::value_object::token_type::TokenType;
use crate::error::{AuthError, AuthResult};

/// Failure of [`TokenAuthority::verify`] or [`TokenAuthority::issue`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature or shape is invalid")]
    Invalid,
    #[error("token has expired")]
    Expired,
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => AuthError::InvalidToken,
            TokenError::Expired => AuthError::ExpiredToken,
            TokenError::Signing(msg) => AuthError::Signing(msg),
        }
    }
}

pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenAuthority {
    /// Build the authority. Fails when the secret is too short to sign with.
    pub fn new(secret: &[u8]) -> AuthResult<Self> {
        if secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(AuthError::Signing(format!(
                "token secret must be at least {} bytes",
                MIN_TOKEN_SECRET_LEN
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Sign `subject` as a `token_type` token valid for `ttl`.
    pub fn issue(
        &self,
        subject: &TokenSubject,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = SessionClaims::new(subject, token_type, now, now + ttl);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Check signature and expiry. Does not check the token version.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid,
                }
            })
    }

    /// Verify and require a specific token type.
    pub fn verify_typed(
        &self,
        token: &str,
        expected: TokenType,
    ) -> Result<SessionClaims, TokenError> {
        let claims = self.verify(token)?;
        if claims.token_type != expected {
            return Err(TokenError::Invalid);
        }
        Ok(claims)
    }
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("algorithm", &"HS256")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn subject(version: i32) -> TokenSubject {
        TokenSubject {
            user_id: UserId::new(),
            email: "writer@example.com".to_string(),
            role: UserRole::User,
            token_version: version,
        }
    }

    /// Replace one character in the middle of the signature segment.
    fn tamper(token: &str) -> String {
        let (head, sig) = token.rsplit_once('.').unwrap();
        let mut sig: Vec<char> = sig.chars().collect();
        let mid = sig.len() / 2;
        sig[mid] = if sig[mid] == 'A' { 'B' } else { 'A' };
        format!("{}.{}", head, sig.into_iter().collect::<String>())
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let err = TokenAuthority::new(b"too-short").unwrap_err();
        assert!(matches!(err, AuthError::Signing(_)));
    }

    #[test]
    fn test_issue_then_verify_returns_claims() {
        let authority = TokenAuthority::new(SECRET).unwrap();
        let subject = subject(1);

        let token = authority
            .issue(&subject, TokenType::Access, Duration::minutes(15))
            .unwrap();
        let claims = authority.verify(&token).unwrap();

        assert_eq!(claims.subject(), subject);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let authority = TokenAuthority::new(SECRET).unwrap();
        let token = authority
            .issue(&subject(0), TokenType::Access, Duration::seconds(-60))
            .unwrap();

        assert_eq!(authority.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let authority = TokenAuthority::new(SECRET).unwrap();
        let token = authority
            .issue(&subject(0), TokenType::Access, Duration::minutes(15))
            .unwrap();

        assert_eq!(authority.verify(&tamper(&token)), Err(TokenError::Invalid));
        assert_eq!(authority.verify("not-a-token"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_other_secret_is_invalid() {
        let issuer = TokenAuthority::new(SECRET).unwrap();
        let other = TokenAuthority::new(b"fedcba9876543210fedcba9876543210").unwrap();
        let token = issuer
            .issue(&subject(0), TokenType::Access, Duration::minutes(15))
            .unwrap();

        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_verify_typed_rejects_other_types() {
        let authority = TokenAuthority::new(SECRET).unwrap();
        let token = authority
            .issue(&subject(0), TokenType::Refresh, Duration::days(7))
            .unwrap();

        assert!(authority.verify_typed(&token, TokenType::Refresh).is_ok());
        assert_eq!(
            authority.verify_typed(&token, TokenType::Access),
            Err(TokenError::Invalid)
        );
    }
}
