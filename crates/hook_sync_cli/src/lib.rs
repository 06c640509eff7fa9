//! HookSync CLI library exports for integration testing.
//!
//! This module exposes command implementations for use in integration tests.

pub mod client;
pub mod commands;
pub mod config;
pub mod errors;
pub mod state;
