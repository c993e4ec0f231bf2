//! Test utilities for Codegate services.
//!
//! Import from dev-dependencies only.

pub mod auth;
