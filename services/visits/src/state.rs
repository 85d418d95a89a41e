use std::sync::Arc;

use crate::domain::types::VisitSettings;
use crate::infra::mail::HttpMailNotifier;
use crate::infra::memory::MemoryAccessCodeStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub codes: Arc<MemoryAccessCodeStore>,
    pub notifier: HttpMailNotifier,
    pub settings: Arc<VisitSettings>,
}

impl AppState {
    pub fn code_store(&self) -> Arc<MemoryAccessCodeStore> {
        Arc::clone(&self.codes)
    }

    pub fn notifier(&self) -> HttpMailNotifier {
        self.notifier.clone()
    }

    pub fn settings(&self) -> Arc<VisitSettings> {
        Arc::clone(&self.settings)
    }
}
