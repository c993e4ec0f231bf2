//! Newtype wrappers for domain identifiers.

use serde::{Deserialize, Serialize};

/// Identifies an activation code record.
///
/// Assigned by the store, strictly increasing, and doubling as the pagination cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeId(pub i64);
