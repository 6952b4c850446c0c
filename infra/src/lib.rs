//! # Infrastructure Layer
//!
//! Concrete implementations behind the domain seams in `pa_core`:
//!
//! - **Database**: MySQL repositories using SQLx (verification codes,
//!   users, audit log)
//! - **SMS**: provider gateways (Aliyun, DX, log-only) behind the
//!   `SmsGateway` trait, with their request-signing codecs
//!
//! The domain crate never names a provider or a database; everything
//! here is wired in at composition time from `pa_shared` configuration.

pub mod database;
pub mod sms;
