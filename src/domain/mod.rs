//! Domain layer - Pure business abstractions
//!
//! This layer contains NO HTTP framework dependencies.
//! Only record types, the repository contract and domain error types.

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
