//! Platform Crate - Technical Infrastructure
//!
//! Building blocks shared by the HTTP-facing crates:
//! - Cookie transport (Set-Cookie building, Cookie header parsing)
//! - Password hashing (Argon2id, NIST SP 800-63B length rules)

pub mod cookie;
pub mod password;
