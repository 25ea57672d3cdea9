//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod notifier;
pub mod postgres;

pub use notifier::TracingNotifier;
pub use postgres::PgUserRepository;
