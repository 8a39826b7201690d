//! Test utilities for route and use case testing.
//!
//! This module provides:
//! - An in-memory `BillingApi` that records requests and serves canned bodies
//! - JSON fixtures shaped like real billing API responses
//! - `TestAppStateBuilder` for HTTP-level tests with `axum_test::TestServer`

mod app_state_builder;
mod billing_mocks;
mod factories;

pub use app_state_builder::*;
pub use billing_mocks::*;
pub use factories::*;
