//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and notifier traits
//! - `application/` - Token authority and use cases
//! - `infra/` - PostgreSQL repository, tracing notifier
//! - `presentation/` - HTTP handlers, DTOs, middleware, routers
//!
//! ## Features
//! - Registration, login, logout and refresh with email + password
//! - Email verification and password reset through signed one-off tokens
//! - Admin session revocation, role change and password reset
//!
//! ## Security Model
//! - Sessions are HS256 JWTs in `HttpOnly`, `SameSite=Strict` cookies
//! - Nothing is stored per session; every user carries a `token_version`
//!   and a token only authenticates while its embedded version matches
//! - Password change, role change and "log out everywhere" bump the
//!   version, revoking every outstanding token in one write
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenAuthority;
pub use error::{AuthError, AuthResult};
pub use infra::{notifier::TracingNotifier, postgres::PgUserRepository};
pub use presentation::{
    handlers::AuthAppState,
    middleware::AuthContext,
    router::{admin_router, auth_router},
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
