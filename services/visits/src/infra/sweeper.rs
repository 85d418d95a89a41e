use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::domain::repository::AccessCodeStore;

/// Periodically drop expired codes that nobody redeemed.
///
/// Without this task, expired records are only removed when someone tries to
/// redeem them.
pub fn spawn_expiry_sweeper<S>(codes: S, every: Duration) -> JoinHandle<()>
where
    S: AccessCodeStore + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = codes.purge_expired();
            if purged > 0 {
                debug!(purged, "expired access codes purged");
            }
        }
    })
}
