//! Auth orchestration: verification, identity resolution, session issuance

mod service;
mod session;

#[cfg(test)]
mod tests;

pub use service::AuthService;
pub use session::SessionIssuer;
