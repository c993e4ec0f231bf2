use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use codegate_domain::id::CodeId;
use codegate_domain::pagination::CursorPage;

/// Validations allowed per code; the attempt that pushes the counter past this invalidates it.
pub const MAX_VALIDATIONS: u32 = 3;

/// Activation window, counted from the first successful validation.
pub const ACTIVATION_TTL_DAYS: i64 = 7;

/// Random suffix length (uppercase hex characters).
pub const CODE_SUFFIX_LEN: usize = 12;

/// Prefix used when the admin leaves it blank.
pub const DEFAULT_CODE_PREFIX: &str = "CODE";

pub const MIN_GENERATE_COUNT: u32 = 1;
pub const MAX_GENERATE_COUNT: u32 = 20_000;

/// Rows per insert statement when generating codes.
pub const GENERATE_BATCH_SIZE: usize = 1000;

/// Generated codes are echoed back only up to this count.
pub const MAX_ECHOED_CODES: usize = 100;

/// Activation code record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationCode {
    pub id: CodeId,
    pub code: String,
    pub is_used: bool,
    pub activated_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub validation_count: u32,
    pub last_validated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Result of one validation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Blank input; nothing was looked up.
    Rejected,
    /// No record carries this code.
    NotFound,
    /// Attempt limit exceeded. Terminal.
    Invalidated { validation_count: u32 },
    /// Activation window has closed.
    Expired {
        validation_count: u32,
        remaining: u32,
    },
    /// Already activated and still inside its window.
    StillValid {
        expires_at: DateTime<Utc>,
        validation_count: u32,
        remaining: u32,
    },
    /// This attempt performed the one-time activation.
    Activated {
        expires_at: DateTime<Utc>,
        validation_count: u32,
        remaining: u32,
    },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::StillValid { .. } | Self::Activated { .. })
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Rejected => "Activation code is required",
            Self::NotFound => "Activation code not found",
            Self::Invalidated { .. } => {
                "Activation code has been invalidated due to excessive validation attempts"
            }
            Self::Expired { .. } => "Activation code has expired",
            Self::StillValid { .. } => "Activation code is valid",
            Self::Activated { .. } => "Activation code successfully activated",
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::StillValid { expires_at, .. } | Self::Activated { expires_at, .. } => {
                Some(*expires_at)
            }
            _ => None,
        }
    }

    pub fn validation_count(&self) -> Option<u32> {
        match self {
            Self::Rejected | Self::NotFound => None,
            Self::Invalidated { validation_count }
            | Self::Expired {
                validation_count, ..
            }
            | Self::StillValid {
                validation_count, ..
            }
            | Self::Activated {
                validation_count, ..
            } => Some(*validation_count),
        }
    }

    pub fn remaining_validations(&self) -> Option<u32> {
        match self {
            Self::Rejected | Self::NotFound => None,
            Self::Invalidated { .. } => Some(0),
            Self::Expired { remaining, .. }
            | Self::StillValid { remaining, .. }
            | Self::Activated { remaining, .. } => Some(*remaining),
        }
    }
}

impl ActivationCode {
    /// Count one validation attempt at `now` and apply the resulting transition.
    ///
    /// The counter and `last_validated_at` always move, whatever the outcome.
    /// Past [`MAX_VALIDATIONS`] the code is invalidated regardless of use or expiry.
    /// An unused code under the limit is activated exactly once; its
    /// `activated_at`/`expires_at` never change afterwards.
    pub fn record_validation(&mut self, now: DateTime<Utc>) -> ValidationOutcome {
        self.validation_count = self.validation_count.saturating_add(1);
        self.last_validated_at = Some(now);
        let validation_count = self.validation_count;

        if validation_count > MAX_VALIDATIONS {
            return ValidationOutcome::Invalidated { validation_count };
        }
        let remaining = MAX_VALIDATIONS.saturating_sub(validation_count);

        if self.is_used {
            return match self.expires_at {
                Some(expires_at) if now < expires_at => ValidationOutcome::StillValid {
                    expires_at,
                    validation_count,
                    remaining,
                },
                _ => ValidationOutcome::Expired {
                    validation_count,
                    remaining,
                },
            };
        }

        let expires_at = now + Duration::days(ACTIVATION_TTL_DAYS);
        self.is_used = true;
        self.activated_at = Some(now);
        self.expires_at = Some(expires_at);
        ValidationOutcome::Activated {
            expires_at,
            validation_count,
            remaining,
        }
    }

    /// Used and past its window at `now`; the sweeper deletes exactly these.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.is_used && self.expires_at.is_some_and(|expires_at| expires_at < now)
    }

    /// Used and still inside its window at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.is_used && self.expires_at.is_some_and(|expires_at| expires_at > now)
    }
}

/// A code about to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivationCode {
    pub code: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeStats {
    pub total: u64,
    pub unused: u64,
    pub used: u64,
    pub active: u64,
}

/// One page of codes plus the number of records matching the filter from the cursor on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePage {
    pub page: CursorPage<ActivationCode>,
    pub total_count: u64,
}

/// Administrator account.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
