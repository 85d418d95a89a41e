use chrono::{DateTime, Duration, Utc};

/// Number of random bytes behind an access code.
pub const ACCESS_CODE_BYTES: usize = 3;

/// Access code length in characters (uppercase hex, two per byte).
pub const ACCESS_CODE_LEN: usize = ACCESS_CODE_BYTES * 2;

/// One issued access code and the visitor it was issued to.
#[derive(Debug, Clone)]
pub struct AccessCode {
    pub code: String,
    pub visitor_name: String,
    pub visitor_email: String,
    pub issued_at: DateTime<Utc>,
    pub duration: Duration,
}

impl AccessCode {
    /// Active iff `now - issued_at <= duration`. Nothing else decides validity.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now - self.issued_at <= self.duration
    }

    /// Time left in the window, clamped to `[0, duration]`.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        (self.duration - (now - self.issued_at)).clamp(Duration::zero(), self.duration)
    }
}

/// Outcome of looking a code up in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeLookup {
    Active { remaining: Duration },
    NotFound,
    /// The record existed but its window had passed; it has been removed.
    Expired,
}

/// Process-wide visit settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct VisitSettings {
    /// Validity window applied to every issued code.
    pub visit_duration: Duration,
    /// Front-end link sent to the visitor alongside the code.
    pub access_url: String,
    /// Where the visitor is sent once the visit ends.
    pub feedback_url: String,
}

impl VisitSettings {
    pub fn duration_minutes(&self) -> i64 {
        self.visit_duration.num_minutes()
    }
}

/// Data handed to the notifier for one issued code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitNotification {
    pub name: String,
    pub code: String,
    pub access_url: String,
    pub duration_minutes: i64,
}

/// Successful redemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemedVisit {
    pub remaining: Duration,
    pub feedback_url: String,
}
