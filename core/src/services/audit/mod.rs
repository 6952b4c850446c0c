//! Audit logging service

mod service;

pub use service::{AuditService, AuditServiceConfig};
