#![allow(async_fn_in_trait)]

use std::sync::Arc;

use chrono::Duration;

use crate::domain::types::{CodeLookup, VisitNotification};
use crate::error::NotifyError;

/// Store of live access codes.
///
/// Operations do not suspend: `validate`'s existence check, expiry check and
/// delete happen as one step, so a just-expired code is removed at most once.
pub trait AccessCodeStore: Send + Sync {
    /// Generate a fresh code for the visitor, store it with `issued_at = now`
    /// and return it. Inputs are expected to be validated by the caller.
    fn issue(&self, visitor_name: &str, visitor_email: &str, duration: Duration) -> String;

    /// Look a code up. An expired record is deleted by this call.
    fn validate(&self, code: &str) -> CodeLookup;

    /// Remove every record whose window has passed. Returns how many went.
    fn purge_expired(&self) -> usize;
}

impl<T: AccessCodeStore + ?Sized> AccessCodeStore for Arc<T> {
    fn issue(&self, visitor_name: &str, visitor_email: &str, duration: Duration) -> String {
        (**self).issue(visitor_name, visitor_email, duration)
    }

    fn validate(&self, code: &str) -> CodeLookup {
        (**self).validate(code)
    }

    fn purge_expired(&self) -> usize {
        (**self).purge_expired()
    }
}

/// Port for delivering an issued code to the visitor.
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        recipient_email: &str,
        notification: &VisitNotification,
    ) -> Result<(), NotifyError>;
}
