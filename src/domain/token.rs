use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Duration, OffsetDateTime};

/// A short-lived OAuth bearer credential for the messaging API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    value: String,
    expires_at: OffsetDateTime,
}

impl AccessToken {
    #[must_use]
    pub const fn new(value: String, expires_at: OffsetDateTime) -> Self {
        Self { value, expires_at }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }

    /// A token is unusable from its expiry instant onwards.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }

    /// Time left before expiry, clamped at zero.
    #[must_use]
    pub fn remaining_at(&self, now: OffsetDateTime) -> Duration {
        (self.expires_at - now).max(Duration::ZERO)
    }
}

// Bearer values never end up in logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken").field("value", &"<redacted>").field("expires_at", &self.expires_at).finish()
    }
}
