pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;
pub mod noop;

pub use memory::MemoryAuditLogRepository;
pub use noop::NoOpAuditLogRepository;
pub use r#trait::AuditLogRepository;
