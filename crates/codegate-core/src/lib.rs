//! Shared plumbing for Codegate services: configuration, errors, health probes,
//! middleware, serde helpers and tracing setup.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
