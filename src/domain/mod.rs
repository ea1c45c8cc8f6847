//! Domain layer - Pure abstractions
//!
//! This layer contains NO adapter dependencies (no filesystem layout, no HTTP).
//! Only trait definitions and domain error types.

pub mod errors;
pub mod repositories;

pub use errors::{DomainError, ServiceError};
pub use repositories::*;
