//! Tracing Notifier
//!
//! Stands in for email delivery: records that a token was issued and the
//! link the user would receive. The token itself is logged only at `debug`.

use crate::domain::entity::user::User;
use crate::domain::notifier::Notifier;

#[derive(Debug, Clone)]
pub struct TracingNotifier {
    frontend_url: String,
}

impl TracingNotifier {
    pub fn new(frontend_url: impl Into<String>) -> Self {
        Self {
            frontend_url: frontend_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn link(&self, path: &str, token: &str) -> String {
        format!("{}/{}?token={}", self.frontend_url, path, token)
    }
}

impl Notifier for TracingNotifier {
    fn verification_issued(&self, user: &User, token: &str) {
        tracing::info!(user_id = %user.user_id, email = %user.email, "Verification email queued");
        tracing::debug!(link = %self.link("verify-email", token), "Verification link");
    }

    fn password_reset_issued(&self, user: &User, token: &str) {
        tracing::info!(user_id = %user.user_id, email = %user.email, "Password reset email queued");
        tracing::debug!(link = %self.link("reset-password", token), "Password reset link");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_strips_trailing_slash() {
        let notifier = TracingNotifier::new("http://localhost:5173/");
        assert_eq!(
            notifier.link("verify-email", "abc"),
            "http://localhost:5173/verify-email?token=abc"
        );
    }
}
