//! Admin authentication types for Codegate.
//!
//! Provides bearer-token issuing/validation, the `AdminIdentity` extractor, and
//! admin password hashing.

pub mod identity;
pub mod password;
pub mod token;
