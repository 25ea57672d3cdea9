//! Application Layer
//!
//! Use cases and application services.

pub mod admin;
pub mod authenticate;
pub mod config;
pub mod current_user;
pub mod password_reset;
pub mod refresh;
pub mod revoke;
pub mod session;
pub mod sign_in;
pub mod sign_up;
pub mod token;
pub mod verify_email;

// Re-exports
pub use admin::AdminUseCase;
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use password_reset::PasswordResetUseCase;
pub use refresh::RefreshUseCase;
pub use revoke::RevokeSessionsUseCase;
pub use session::SessionTokens;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{TokenAuthority, TokenError};
pub use verify_email::VerifyEmailUseCase;
