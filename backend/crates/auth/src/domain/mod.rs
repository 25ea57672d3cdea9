//! Domain Layer
//!
//! Contains entities, value objects, repository traits and outbound ports.

pub mod entity;
pub mod notifier;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    session_claims::{SessionClaims, TokenSubject},
    user::User,
};
pub use notifier::Notifier;
pub use repository::UserRepository;
