//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Shortest HS256 secret accepted at startup
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Access token cookie name
    pub access_cookie_name: String,
    /// Refresh token cookie name
    pub refresh_cookie_name: String,
    /// HS256 signing secret
    pub token_secret: Vec<u8>,
    /// Access token TTL (15 minutes)
    pub access_ttl: Duration,
    /// Refresh token TTL (7 days)
    pub refresh_ttl: Duration,
    /// Email verification token TTL (24 hours)
    pub verification_ttl: Duration,
    /// Password reset token TTL (1 hour)
    pub reset_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: "auth_token".to_string(),
            refresh_cookie_name: "refresh_token".to_string(),
            token_secret: Vec::new(),
            access_ttl: Duration::from_secs(15 * 60),
            refresh_ttl: Duration::from_secs(7 * 24 * 3600),
            verification_ttl: Duration::from_secs(24 * 3600),
            reset_ttl: Duration::from_secs(3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Config signing with the given secret
    pub fn new(token_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: token_secret.into(),
            ..Default::default()
        }
    }

    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 64];
        rand::rng().fill_bytes(&mut secret);
        Self::new(secret)
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Attributes of the access token cookie
    pub fn access_cookie(&self) -> CookieConfig {
        self.cookie(&self.access_cookie_name, self.access_ttl)
    }

    /// Attributes of the refresh token cookie
    pub fn refresh_cookie(&self) -> CookieConfig {
        self.cookie(&self.refresh_cookie_name, self.refresh_ttl)
    }

    fn cookie(&self, name: &str, ttl: Duration) -> CookieConfig {
        CookieConfig {
            same_site: self.cookie_same_site,
            ..CookieConfig::http_only(name, self.cookie_secure, ttl.as_secs() as i64)
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_cookie_name", &self.access_cookie_name)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .field("token_secret", &"[REDACTED]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("verification_ttl", &self.verification_ttl)
            .field("reset_ttl", &self.reset_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cookie_attributes() {
        let config = AuthConfig::new(vec![7u8; 32]);

        let access = config.access_cookie().build_set_cookie("abc");
        assert!(access.starts_with("auth_token=abc"));
        assert!(access.contains("HttpOnly"));
        assert!(access.contains("Secure"));
        assert!(access.contains("SameSite=Strict"));
        assert!(access.contains("Max-Age=900"));

        let refresh = config.refresh_cookie().build_set_cookie("def");
        assert!(refresh.starts_with("refresh_token=def"));
        assert!(refresh.contains("Max-Age=604800"));
    }

    #[test]
    fn test_development_cookie_is_not_secure() {
        let config = AuthConfig::development();
        assert!(!config.access_cookie().build_set_cookie("abc").contains("Secure"));
        assert!(config.token_secret.len() >= MIN_TOKEN_SECRET_LEN);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::new(b"a-very-secret-signing-key-of-32-bytes".to_vec())
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("a-very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
