//! Tests for auth orchestration

pub mod mocks;

mod service_tests;
