//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).
//! Missing required values stop the process before anything binds.

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::MIN_TOKEN_SECRET_LEN;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub production: bool,
    pub frontend_url: String,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; tests pass a map instead of the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let token_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .context("JWT_SECRET must be set")?;
        if token_secret.len() < MIN_TOKEN_SECRET_LEN {
            bail!("JWT_SECRET must be at least {} bytes", MIN_TOKEN_SECRET_LEN);
        }

        let production = lookup("APP_ENV").is_some_and(|env| env == "production");

        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {port}"))?,
            None => DEFAULT_PORT,
        };

        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string());

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec![frontend_url.clone()]);

        let auth = AuthConfig {
            cookie_secure: production,
            password_pepper: lookup("PASSWORD_PEPPER")
                .filter(|p| !p.is_empty())
                .map(String::into_bytes),
            ..AuthConfig::new(token_secret.into_bytes())
        };

        Ok(Self {
            database_url,
            port,
            production,
            frontend_url,
            frontend_origins,
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let err = config(&[("DATABASE_URL", "postgres://localhost/blog")])
            .err()
            .unwrap();
        assert!(err.to_string().contains("JWT_SECRET"));

        assert!(
            config(&[
                ("DATABASE_URL", "postgres://localhost/blog"),
                ("JWT_SECRET", "short"),
            ])
            .is_err()
        );
    }

    #[test]
    fn test_defaults() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("JWT_SECRET", SECRET),
        ])
        .unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert!(!config.production);
        assert!(!config.auth.cookie_secure);
        assert_eq!(config.frontend_origins, vec![DEFAULT_FRONTEND_URL.to_string()]);
        assert!(config.auth.pepper().is_none());
    }

    #[test]
    fn test_production_sets_secure_cookies() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("JWT_SECRET", SECRET),
            ("APP_ENV", "production"),
            ("PORT", "8080"),
            ("FRONTEND_ORIGINS", "https://blog.example.com, https://www.blog.example.com"),
            ("PASSWORD_PEPPER", "pepper"),
        ])
        .unwrap();

        assert!(config.auth.cookie_secure);
        assert_eq!(config.port, 8080);
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.auth.pepper(), Some(&b"pepper"[..]));
    }

    #[test]
    fn test_bad_port() {
        assert!(
            config(&[
                ("DATABASE_URL", "postgres://localhost/blog"),
                ("JWT_SECRET", SECRET),
                ("PORT", "eighty"),
            ])
            .is_err()
        );
    }
}
