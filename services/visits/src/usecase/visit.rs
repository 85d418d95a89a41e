use std::sync::Arc;

use tracing::info;

use crate::domain::repository::{AccessCodeStore, Notifier};
use crate::domain::types::{CodeLookup, RedeemedVisit, VisitNotification, VisitSettings};
use crate::error::VisitServiceError;

/// Loose email shape check: one `@`, a non-empty local part and a dotted domain.
/// Deliverability is the mail relay's call.
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

pub struct RequestVisitInput {
    pub name: String,
    pub email: String,
}

pub struct RequestVisitUseCase<S, N>
where
    S: AccessCodeStore,
    N: Notifier,
{
    pub codes: S,
    pub notifier: N,
    pub settings: Arc<VisitSettings>,
}

impl<S, N> RequestVisitUseCase<S, N>
where
    S: AccessCodeStore,
    N: Notifier,
{
    pub async fn execute(&self, input: RequestVisitInput) -> Result<(), VisitServiceError> {
        // 1. Validate input → 400
        let name = input.name.trim();
        let email = input.email.trim();
        if name.is_empty() || !is_email_shaped(email) {
            return Err(VisitServiceError::InvalidInput);
        }

        // 2. Issue the code
        let duration_minutes = self.settings.duration_minutes();
        let code = self
            .codes
            .issue(name, email, self.settings.visit_duration);
        info!(duration_minutes, "access code issued");

        // 3. Notify the visitor. The code stays issued whatever happens here.
        let notification = VisitNotification {
            name: name.to_owned(),
            code,
            access_url: self.settings.access_url.clone(),
            duration_minutes,
        };
        self.notifier
            .send(email, &notification)
            .await
            .map_err(VisitServiceError::NotificationFailed)
    }
}

pub struct RedeemVisitInput {
    pub code: String,
}

pub struct RedeemVisitUseCase<S>
where
    S: AccessCodeStore,
{
    pub codes: S,
    pub settings: Arc<VisitSettings>,
}

impl<S> RedeemVisitUseCase<S>
where
    S: AccessCodeStore,
{
    pub fn execute(&self, input: RedeemVisitInput) -> Result<RedeemedVisit, VisitServiceError> {
        match self.codes.validate(&input.code) {
            CodeLookup::Active { remaining } => Ok(RedeemedVisit {
                remaining,
                feedback_url: self.settings.feedback_url.clone(),
            }),
            CodeLookup::NotFound | CodeLookup::Expired => Err(VisitServiceError::InvalidCode),
        }
    }
}
