//! Domain types shared across Codegate crates.
//!
//! Pure types with no framework dependencies.

pub mod id;
pub mod pagination;
