//! Core domain + application logic for the Antipanic Mini App client.
//!
//! This crate is intentionally framework-agnostic. The Telegram host object and
//! the backend HTTP transport live behind ports (traits) implemented in adapter
//! crates or test fakes.

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod host;
pub mod launch;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod view;

pub use errors::{Error, Result};
