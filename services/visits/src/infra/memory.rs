use std::collections::HashMap;

use chrono::Duration;
use parking_lot::Mutex;
use rand::RngExt;
use tracing::{debug, warn};

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::repository::AccessCodeStore;
use crate::domain::types::{ACCESS_CODE_BYTES, AccessCode, CodeLookup};

fn generate_code() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; ACCESS_CODE_BYTES] = rng.random();
    hex::encode_upper(bytes)
}

/// In-process code store. State lives only as long as the process.
///
/// Records are removed lazily by `validate`, or by `purge_expired` when the
/// sweeper is enabled; codes nobody looks up again otherwise stay in memory.
pub struct MemoryAccessCodeStore<C = SystemClock> {
    codes: Mutex<HashMap<String, AccessCode>>,
    clock: C,
    generate: fn() -> String,
}

impl MemoryAccessCodeStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryAccessCodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryAccessCodeStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            codes: Mutex::new(HashMap::new()),
            clock,
            generate: generate_code,
        }
    }

    #[cfg(test)]
    fn with_generator(clock: C, generate: fn() -> String) -> Self {
        Self {
            generate,
            ..Self::with_clock(clock)
        }
    }

    /// Number of stored records, expired-but-unvisited ones included.
    pub fn len(&self) -> usize {
        self.codes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.lock().is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.lock().contains_key(code)
    }
}

impl<C: Clock> AccessCodeStore for MemoryAccessCodeStore<C> {
    fn issue(&self, visitor_name: &str, visitor_email: &str, duration: Duration) -> String {
        let code = (self.generate)();
        let record = AccessCode {
            code: code.clone(),
            visitor_name: visitor_name.to_owned(),
            visitor_email: visitor_email.to_owned(),
            issued_at: self.clock.now(),
            duration,
        };

        // No retry on collision: the newer record replaces the older one.
        if self.codes.lock().insert(code.clone(), record).is_some() {
            warn!("access code collision, previous record replaced");
        }
        code
    }

    fn validate(&self, code: &str) -> CodeLookup {
        let now = self.clock.now();
        let mut codes = self.codes.lock();

        let Some(record) = codes.get(code) else {
            return CodeLookup::NotFound;
        };
        if !record.is_active_at(now) {
            codes.remove(code);
            debug!("expired access code removed");
            return CodeLookup::Expired;
        }
        CodeLookup::Active {
            remaining: record.remaining_at(now),
        }
    }

    fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut codes = self.codes.lock();
        let before = codes.len();
        codes.retain(|_, record| record.is_active_at(now));
        before - codes.len()
    }
}
