//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - the unified [`error::app_error::AppError`] and its HTTP classification
//! - typed UUID identifiers ([`id::Id`])
//!
//! Nothing domain specific lives here; auth rules belong to the `auth` crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
