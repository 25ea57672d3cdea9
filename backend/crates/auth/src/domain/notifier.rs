//! Outbound notifications
//!
//! Tokens that must reach the user out of band (email verification, password
//! reset) are handed to a [`Notifier`]. Delivery is not this crate's concern.

use crate::domain::entity::user::User;

pub trait Notifier: Send + Sync {
    /// A verification token was issued at registration.
    fn verification_issued(&self, user: &User, token: &str);

    /// A password reset token was issued.
    fn password_reset_issued(&self, user: &User, token: &str);
}
