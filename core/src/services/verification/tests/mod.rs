//! Tests for the verification code lifecycle

pub mod mocks;
