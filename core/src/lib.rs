//! # PhoneAuth Core
//!
//! Core business logic and domain layer for the phone-auth service.
//! This crate contains domain entities, the verification code lifecycle,
//! auth orchestration, repository interfaces, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use errors::{AuthError, DomainError, DomainResult};
